/// Trait for types that can be inverted (e.g. a curve traversed backwards).
pub trait Invertible: Clone {
    fn invert(&mut self);
    fn inverse(&self) -> Self {
        let mut inv = self.clone();
        inv.invert();
        inv
    }
}
