//! A variant belongs to one boundary.

#[derive(feature_boundaries::FeatureAction)]
enum Screen {
    #[view] #[internal] Both(u8),
    Other(u8),
    Delegate(u8),
}

fn main() {}
