/// Round-robin allocator for texture image units.
///
/// Unit 0 is never handed out: it is left to incidental texture work
/// (uploads, resizes) which may rebind it at any time. There is no
/// collision detection, so a single draw that samples more textures than
/// `max_units - 1` will alias earlier bindings.
#[derive(Debug, Clone)]
pub struct TextureUnits {
    current: u32,
    max_units: u32,
}

impl TextureUnits {
    pub fn new(max_units: u32) -> Self {
        // One unit would leave nothing but unit 0.
        Self {
            current: 0,
            max_units: max_units.max(2),
        }
    }

    pub fn max_units(&self) -> u32 {
        self.max_units
    }

    /// Returns the next unit in `1..max_units`.
    pub fn next_unit(&mut self) -> u32 {
        self.current = (self.current + 1) % self.max_units;
        if self.current == 0 {
            self.current = 1;
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_selects_unit_zero() {
        let mut units = TextureUnits::new(16);
        for _ in 0..1000 {
            assert_ne!(units.next_unit(), 0);
        }
    }

    #[test]
    fn cycles_through_all_units_but_zero() {
        let mut units = TextureUnits::new(4);
        let seen: Vec<u32> = (0..7).map(|_| units.next_unit()).collect();
        assert_eq!(seen, vec![1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn degenerate_limit_still_avoids_zero() {
        let mut units = TextureUnits::new(1);
        assert_eq!(units.max_units(), 2);
        assert_eq!(units.next_unit(), 1);
        assert_eq!(units.next_unit(), 1);
    }
}
