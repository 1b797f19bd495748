pub mod split_cubic_bezier;

/// Trait for curves that can be split into two at a parameter.
pub trait Split: Sized {
    type Option;

    fn try_split(&self, option: Self::Option) -> anyhow::Result<(Self, Self)>;
}
