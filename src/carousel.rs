#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CarouselError {
    #[error("no screenshots available")]
    Empty,

    #[error("image index {index} out of range (carousel has {len} images)")]
    OutOfRange { index: usize, len: usize },
}

/// Cyclic image carousel.
///
/// An empty image list is the "no screenshots" state: it has no current
/// index and navigation does nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    images: Vec<String>,
    index: usize,
}

impl Carousel {
    pub fn new(images: Vec<String>) -> Self {
        Self { images, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.index)
    }

    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    pub fn next(&mut self) {
        if !self.is_empty() {
            self.index = (self.index + 1) % self.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.is_empty() {
            self.index = (self.index + self.len() - 1) % self.len();
        }
    }

    /// Jumps to `index`; an out-of-range index leaves the position unchanged.
    pub fn select(&mut self, index: usize) -> Result<(), CarouselError> {
        if self.is_empty() {
            return Err(CarouselError::Empty);
        }
        if index >= self.len() {
            return Err(CarouselError::OutOfRange {
                index,
                len: self.len(),
            });
        }
        self.index = index;
        Ok(())
    }

    /// One marker per image; `true` marks the displayed one.
    pub fn indicators(&self) -> Vec<bool> {
        (0..self.len()).map(|i| i == self.index).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(n: usize) -> Carousel {
        Carousel::new((0..n).map(|i| format!("/img{i}.png")).collect())
    }

    #[test]
    fn starts_at_first_image() {
        let c = carousel(3);
        assert_eq!(c.index(), Some(0));
        assert_eq!(c.current(), Some("/img0.png"));
    }

    #[test]
    fn next_n_times_wraps_back_to_start() {
        for n in 1..=6 {
            let mut c = carousel(n);
            for _ in 0..n {
                c.next();
            }
            assert_eq!(c.index(), Some(0), "n={n}");
        }
    }

    #[test]
    fn prev_from_start_wraps_to_last() {
        let mut c = carousel(6);
        c.prev();
        assert_eq!(c.index(), Some(5));
        assert_eq!(c.current(), Some("/img5.png"));
        c.next();
        assert_eq!(c.index(), Some(0));
    }

    #[test]
    fn single_image_stays_put() {
        let mut c = carousel(1);
        c.next();
        c.prev();
        assert_eq!(c.index(), Some(0));
    }

    #[test]
    fn select_sets_index_and_rejects_out_of_range() {
        let mut c = carousel(4);
        c.select(2).unwrap();
        assert_eq!(c.index(), Some(2));
        assert_eq!(c.indicators(), vec![false, false, true, false]);

        assert_eq!(
            c.select(4),
            Err(CarouselError::OutOfRange { index: 4, len: 4 })
        );
        assert_eq!(c.index(), Some(2));
    }

    #[test]
    fn empty_carousel_has_no_index() {
        let mut c = carousel(0);
        assert!(c.is_empty());
        assert_eq!(c.index(), None);
        assert_eq!(c.current(), None);
        c.next();
        c.prev();
        assert_eq!(c.index(), None);
        assert_eq!(c.select(0), Err(CarouselError::Empty));
        assert!(c.indicators().is_empty());
    }

    #[test]
    fn navigation_is_deterministic() {
        let run = || {
            let mut c = carousel(5);
            c.next();
            c.next();
            c.prev();
            c.select(4).unwrap();
            c.next();
            c.next();
            c.index()
        };
        assert_eq!(run(), Some(1));
        assert_eq!(run(), run());
    }
}
