/// External (serializable) representations of requests and responses.
pub mod ext_repr;

/// All logic for converting external requests into internal ones
pub mod import;

/// All logic for exporting allocations into external responses
pub mod export;

/// All logic for creating SVG from [`Container`](crate::entities::Container)s
pub mod svg;
