//! Serializers for resolved pad rows.

pub mod svg;
