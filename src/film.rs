/// Row major raster of `T`, the pixel sink of a render.
#[derive(Clone, Debug)]
pub struct Film<T> {
    pub buffer: Vec<T>,
    pub width: usize,
    pub height: usize,
}

impl<T: Copy> Film<T> {
    pub fn new(width: usize, height: usize, fill_value: T) -> Film<T> {
        Film {
            buffer: vec![fill_value; width * height],
            width,
            height,
        }
    }

    pub fn at(&self, x: usize, y: usize) -> T {
        debug_assert!(x < self.width && y < self.height);
        self.buffer[y * self.width + x]
    }

    pub fn write_at(&mut self, x: usize, y: usize, value: T) {
        debug_assert!(x < self.width && y < self.height);
        self.buffer[y * self.width + x] = value;
    }

    pub fn total_pixels(&self) -> usize {
        self.width * self.height
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let mut film = Film::new(3, 2, 0u32);
        film.write_at(2, 1, 7);
        assert_eq!(film.buffer[5], 7);
        assert_eq!(film.at(2, 1), 7);
        assert_eq!(film.total_pixels(), 6);
    }
}
