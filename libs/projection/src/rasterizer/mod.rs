//! # Rasterizer
//!
//! Turns world-space polygons into draw-ordered screen polygons.
//!
//! Polygons are collected as fragments, each caching its clip-space vertices,
//! the per-axis view-space minimum and a model-space normal. [`Rasterizer::rasterize`]
//! then:
//!
//! - drops fragments whose view-space minimum z is positive (entirely
//!   behind the camera)
//! - orders the rest by the view-space minimum, comparing z, then y, then x,
//!   so the farthest fragments come first
//! - optionally drops fragments facing away from the camera
//! - drops fragments with any non-finite screen point
//!
//! Painting is left to the caller; the shading value is carried through
//! untouched.

use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};
use serde::{Deserialize, Serialize};

use config::constants::MIN_POLYGON_VERTICES;
use halfedge_mesh::{FaceId, HalfEdgeMesh};

use crate::error::{ProjectionError, ProjectionResult};
use crate::projection3d::Projection3D;

// =============================================================================
// TYPES
// =============================================================================

/// How a polygon should be painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paint {
    /// Interior filled
    Fill,
    /// Outline only
    Stroke,
}

/// Rasterizer switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterOptions {
    /// Skip polygons whose front side faces away from the camera.
    pub backface_culling: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            backface_culling: true,
        }
    }
}

/// A polygon ready to paint, in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenPolygon<S> {
    /// Closed outline in screen coordinates
    pub points: Vec<Vec2>,
    /// Fill or stroke
    pub paint: Paint,
    /// Caller-supplied shading
    pub shading: S,
    /// Unit normal of the source polygon in model space
    pub model_space_normal: Vec3,
    /// Whether the polygon faces away from the camera
    pub back_facing: bool,
}

impl<S> ScreenPolygon<S> {
    /// Even-odd containment test.
    ///
    /// # Examples
    /// ```
    /// use glam::{Vec2, Vec3};
    /// use projection::{Paint, ScreenPolygon};
    ///
    /// let square = ScreenPolygon {
    ///     points: vec![Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y],
    ///     paint: Paint::Fill,
    ///     shading: (),
    ///     model_space_normal: Vec3::Z,
    ///     back_facing: false,
    /// };
    /// assert!(square.contains(Vec2::splat(0.5)));
    /// assert!(!square.contains(Vec2::new(1.5, 0.5)));
    /// ```
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let mut inside = false;
        let count = self.points.len();
        for i in 0..count {
            let a = self.points[i];
            let b = self.points[(i + count - 1) % count];
            if (a.y > point.y) != (b.y > point.y) {
                let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

#[derive(Debug, Clone)]
struct Fragment<S> {
    model_space_vertices: Vec<Vec3>,
    clip_space_vertices: Vec<Vec4>,
    view_space_min: Vec3,
    model_space_normal: Vec3,
    paint: Paint,
    shading: S,
}

impl<S> Fragment<S> {
    fn new(
        vertices: &[Vec3],
        projection: &Projection3D,
        paint: Paint,
        shading: S,
    ) -> ProjectionResult<Self> {
        if vertices.len() < MIN_POLYGON_VERTICES {
            return Err(ProjectionError::DegeneratePolygon {
                count: vertices.len(),
                min: MIN_POLYGON_VERTICES,
            });
        }
        let transform = projection.world_to_clip();
        let clip_space_vertices: Vec<Vec4> = vertices
            .iter()
            .map(|v| transform * v.extend(1.0))
            .collect();
        let view_space_min = vertices
            .iter()
            .map(|&v| projection.view_transform.transform_point3(v))
            .fold(Vec3::splat(f32::INFINITY), Vec3::min);
        let (a, b, c) = (vertices[0], vertices[1], vertices[2]);
        let model_space_normal = (b - a).cross(c - a).normalize_or_zero();

        Ok(Self {
            model_space_vertices: vertices.to_vec(),
            clip_space_vertices,
            view_space_min,
            model_space_normal,
            paint,
            shading,
        })
    }
}

// =============================================================================
// RASTERIZER
// =============================================================================

/// Collects polygons and emits them in painter's order.
///
/// # Examples
/// ```
/// use glam::{Vec2, Vec3};
/// use projection::{Paint, Projection3D, RasterOptions, Rasterizer};
///
/// let options = RasterOptions { backface_culling: false };
/// let mut rasterizer = Rasterizer::new(Projection3D::new(Vec2::ONE), options);
/// rasterizer.fill(&[Vec3::ZERO, Vec3::X, Vec3::Y], "red").unwrap();
///
/// let drawn = rasterizer.rasterize();
/// assert_eq!(drawn.len(), 1);
/// assert_eq!(drawn[0].paint, Paint::Fill);
/// assert_eq!(drawn[0].shading, "red");
/// ```
#[derive(Debug, Clone)]
pub struct Rasterizer<S> {
    projection: Projection3D,
    options: RasterOptions,
    fragments: Vec<Fragment<S>>,
}

impl<S: Clone> Rasterizer<S> {
    /// Creates an empty rasterizer for one frame.
    #[must_use]
    pub fn new(projection: Projection3D, options: RasterOptions) -> Self {
        Self {
            projection,
            options,
            fragments: Vec::new(),
        }
    }

    /// The transform stack fragments are projected with.
    #[must_use]
    pub fn projection(&self) -> &Projection3D {
        &self.projection
    }

    /// Number of collected fragments.
    #[must_use]
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Drops every collected fragment.
    pub fn clear(&mut self) {
        self.fragments.clear();
    }

    /// Adds a filled polygon.
    pub fn fill(&mut self, polygon: &[Vec3], shading: S) -> ProjectionResult<()> {
        self.push(polygon, Paint::Fill, shading)
    }

    /// Adds an outlined polygon.
    pub fn stroke(&mut self, polygon: &[Vec3], shading: S) -> ProjectionResult<()> {
        self.push(polygon, Paint::Stroke, shading)
    }

    /// Adds every face of `mesh` as a filled polygon, returning how many.
    ///
    /// All faces are checked before any is added.
    pub fn fill_mesh(&mut self, mesh: &HalfEdgeMesh, shading: S) -> ProjectionResult<usize> {
        let fragments = mesh
            .polygons()
            .map(|polygon| Fragment::new(&polygon, &self.projection, Paint::Fill, shading.clone()))
            .collect::<ProjectionResult<Vec<_>>>()?;
        let count = fragments.len();
        self.fragments.extend(fragments);
        Ok(count)
    }

    /// Adds one face of `mesh` as a filled polygon.
    pub fn fill_face(&mut self, mesh: &HalfEdgeMesh, face: FaceId, shading: S) -> ProjectionResult<()> {
        let polygon = mesh.polygon(face)?;
        self.push(&polygon, Paint::Fill, shading)
    }

    fn push(&mut self, polygon: &[Vec3], paint: Paint, shading: S) -> ProjectionResult<()> {
        let fragment = Fragment::new(polygon, &self.projection, paint, shading)?;
        self.fragments.push(fragment);
        Ok(())
    }

    /// Screen polygons in draw order, back to front.
    #[must_use]
    pub fn rasterize(&self) -> Vec<ScreenPolygon<S>> {
        let mut visible: Vec<&Fragment<S>> = self
            .fragments
            .iter()
            .filter(|fragment| fragment.view_space_min.z <= 0.0)
            .collect();
        visible.sort_by(|a, b| {
            let (a, b) = (a.view_space_min, b.view_space_min);
            a.z.total_cmp(&b.z)
                .then(a.y.total_cmp(&b.y))
                .then(a.x.total_cmp(&b.x))
        });

        let view_position = self.projection.view_transform.inverse().w_axis.truncate();
        let mut drawn = Vec::with_capacity(visible.len());
        for (order, fragment) in visible.into_iter().enumerate() {
            let normal = fragment.model_space_normal;
            let back_facing = normal != Vec3::ZERO
                && (fragment.model_space_vertices[0] - view_position).dot(normal) >= 0.0;
            if self.options.backface_culling && back_facing {
                continue;
            }

            let points: Vec<Vec2> = fragment
                .clip_space_vertices
                .iter()
                .map(|clip| clip.xy() / clip.w)
                .collect();
            if let Some(bad) = points.iter().position(|p| !p.is_finite()) {
                tracing::debug!(order, vertex = bad, "skipping fragment with non-finite screen point");
                continue;
            }

            drawn.push(ScreenPolygon {
                points,
                paint: fragment.paint,
                shading: fragment.shading.clone(),
                model_space_normal: normal,
                back_facing,
            });
        }
        drawn
    }

    /// Top-most drawn polygon containing `point`, if any.
    #[must_use]
    pub fn hit_test(&self, point: Vec2) -> Option<ScreenPolygon<S>> {
        self.rasterize()
            .into_iter()
            .rev()
            .find(|polygon| polygon.contains(point))
    }
}
