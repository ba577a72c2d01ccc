/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports:
/// storage backends, export formatters and output destinations.
pub mod outbound;
