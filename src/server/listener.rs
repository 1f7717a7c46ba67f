// Listener construction
// socket2-built TCP listener handed to tokio

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a bound, listening `TcpListener` for the given address.
///
/// `SO_REUSEADDR` is set so a restarted process can rebind a port still in
/// TIME_WAIT. The socket is switched to non-blocking before tokio takes
/// ownership of it. Bind and listen failures propagate; the caller treats
/// them as fatal startup errors.
pub fn create_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
