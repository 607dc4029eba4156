//! Every boundary needs a variant, by attribute or by name.

#[derive(feature_boundaries::FeatureAction)]
enum Row {
    View(u8),
    Internal(u8),
    Parent(u8),
}

fn main() {}
