//! Each boundary is claimed by a single variant.

#[derive(feature_boundaries::FeatureAction)]
enum Screen {
    #[view] Tapped(u8),
    #[view] Typed(u8),
    Internal(u8),
}

fn main() {}
