//! Desktop camera.
//!
//! Outside of an immersive session the scene is viewed through a fixed
//! perspective camera. Its main job here is turning a cursor position into a
//! world-space pick ray.

use cgmath::{EuclideanSpace, Matrix4, Point3, Rad, SquareMatrix, Vector3, Vector4};

use crate::pick::Ray;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    width: u32,
    height: u32,
}

impl Camera {
    pub fn new(
        eye: Point3<f32>,
        target: Point3<f32>,
        fovy: Rad<f32>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            eye,
            target,
            up: Vector3::unit_y(),
            fovy,
            znear: 0.1,
            zfar: 500.0,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Zero-sized viewports (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        cgmath::perspective(self.fovy, self.aspect(), self.znear, self.zfar)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray from the eye through the pixel at `(x, y)`, origin top left.
    pub fn screen_ray(&self, x: f32, y: f32) -> Option<Ray> {
        let inverse = self.view_projection().invert()?;
        let ndc_x = 2.0 * x / self.width as f32 - 1.0;
        let ndc_y = 1.0 - 2.0 * y / self.height as f32;
        let near = unproject(inverse, Vector4::new(ndc_x, ndc_y, -1.0, 1.0))?;
        let far = unproject(inverse, Vector4::new(ndc_x, ndc_y, 1.0, 1.0))?;
        Ray::new(near, far - near)
    }

    /// Pixel position of a world point, or `None` if it is behind the camera.
    pub fn world_to_screen(&self, point: Point3<f32>) -> Option<(f32, f32)> {
        let clip = self.view_projection() * point.to_homogeneous();
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some((
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
        ))
    }
}

fn unproject(inverse: Matrix4<f32>, ndc: Vector4<f32>) -> Option<Point3<f32>> {
    let world = inverse * ndc;
    if world.w.abs() <= f32::EPSILON {
        return None;
    }
    Some(Point3::from_vec(world.truncate() / world.w))
}
