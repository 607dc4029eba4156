//! A feature action has one variant per boundary, no more and no fewer.

#[derive(feature_boundaries::FeatureAction)]
enum TwoWay {
    View(u8),
    Internal(u8),
}

fn main() {}
