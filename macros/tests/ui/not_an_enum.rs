//! Only enums can be feature actions.

#[derive(feature_boundaries::FeatureAction)]
struct Counter(u32);

fn main() {}
