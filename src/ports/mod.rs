/// Ports - the seams between the risk register core and the outside world
///
/// Inbound ports are what callers drive (the risk management API);
/// outbound ports are what the core drives (storage, export rendering, output).
pub mod inbound;
pub mod outbound;
