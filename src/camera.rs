use crate::math::{Point3, Ray, Vec3};

/// Pinhole camera. Image rows grow along `down`, columns along `right`.
#[derive(Copy, Clone, Debug)]
pub struct PinholeCamera {
    pub origin: Point3,
    pub direction: Vec3,
    pub right: Vec3,
    pub down: Vec3,
    /// Distance of the image plane along `direction`, in units of half the image height.
    pub focal_length: f64,
    pub width: usize,
    pub height: usize,
}

impl PinholeCamera {
    pub fn new(
        look_from: Point3,
        look_at: Point3,
        up: Vec3,
        focal_length: f64,
        width: usize,
        height: usize,
    ) -> PinholeCamera {
        let direction = (look_at - look_from).normalized();
        let right = direction.cross(up).normalized();
        let down = direction.cross(right).normalized();
        PinholeCamera {
            origin: look_from,
            direction,
            right,
            down,
            focal_length,
            width,
            height,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Ray through the corner of pixel `(x, y)`, the image center maps to `direction`.
    pub fn get_ray(&self, x: usize, y: usize) -> Ray {
        let half_width = self.width as f64 / 2.0;
        let half_height = self.height as f64 / 2.0;
        let ndc_x = (x as f64 - half_width) / half_width * self.aspect_ratio();
        let ndc_y = (y as f64 - half_height) / half_height;

        let direction =
            self.right * ndc_x + self.down * ndc_y + self.direction * self.focal_length;
        Ray::new(self.origin, direction.normalized())
    }
}
