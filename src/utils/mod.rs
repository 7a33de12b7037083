pub mod normalize;
pub mod shift_label;
