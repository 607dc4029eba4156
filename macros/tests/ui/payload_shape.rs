//! Boundary variants wrap exactly one payload.

#[derive(feature_boundaries::FeatureAction)]
enum Row {
    View(u8),
    Internal(u8, u8),
    Delegate(u8),
}

fn main() {}
