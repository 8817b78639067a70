//! Contour extraction and contour geometry.
//!
//! A [`ContourForest`] owns every boundary traced from one mask. Nodes
//! reference each other through [`ContourId`] indices into the forest
//! (`next`/`prev` siblings, first `child`, enclosing `parent`), so the
//! whole forest is built and dropped as a unit and no node owns another.
//!
//! Tracing itself is delegated to `imageproc::contours::find_contours`
//! (Suzuki-Abe border following). Arc length and convex hull delegate to
//! `imageproc::geometry`; polygon approximation uses [`crate::simplify`].

use image::GrayImage;
use imageproc::contours::BorderType;
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

use crate::rectangle::Rectangle;
use crate::simplify::simplify;
use crate::types::{ContourError, GeometryError};

/// Which borders to retrieve and whether to link them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContourMode {
    /// Only outermost borders. Flat: no links are populated.
    #[default]
    External,
    /// Every border, outer and hole. Flat: no links are populated.
    List,
    /// Every border, linked by nesting.
    Tree,
}

impl ContourMode {
    /// Whether this mode populates `next`/`prev`/`child`/`parent`.
    #[must_use]
    pub const fn is_hierarchical(self) -> bool {
        matches!(self, Self::Tree)
    }
}

/// Whether a border surrounds foreground or a hole inside foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderKind {
    Outer,
    Hole,
}

/// Stable index of a contour inside its [`ContourForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContourId(usize);

impl ContourId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Winding of a convex hull in image coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HullOrientation {
    #[default]
    Clockwise,
    CounterClockwise,
}

/// One boundary loop of pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    points: Vec<Point<i32>>,
    border: BorderKind,
    next: Option<ContourId>,
    prev: Option<ContourId>,
    child: Option<ContourId>,
    parent: Option<ContourId>,
}

impl Contour {
    /// A detached outer contour with no links.
    #[must_use]
    pub const fn new(points: Vec<Point<i32>>) -> Self {
        Self::detached(points, BorderKind::Outer)
    }

    const fn detached(points: Vec<Point<i32>>, border: BorderKind) -> Self {
        Self {
            points,
            border,
            next: None,
            prev: None,
            child: None,
            parent: None,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[Point<i32>] {
        &self.points
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub const fn border(&self) -> BorderKind {
        self.border
    }

    #[must_use]
    pub const fn next(&self) -> Option<ContourId> {
        self.next
    }

    #[must_use]
    pub const fn prev(&self) -> Option<ContourId> {
        self.prev
    }

    #[must_use]
    pub const fn child(&self) -> Option<ContourId> {
        self.child
    }

    #[must_use]
    pub const fn parent(&self) -> Option<ContourId> {
        self.parent
    }

    /// Shoelace area of the closed polygon through the points.
    ///
    /// Positive when the points wind clockwise on screen (y down),
    /// negative when counter-clockwise.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        shoelace(&self.points)
    }

    /// Unsigned enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Sum of segment lengths, including the closing segment if `closed`.
    #[must_use]
    pub fn arc_length(&self, closed: bool) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        imageproc::geometry::arc_length(&self.points, closed)
    }

    /// Douglas-Peucker simplification.
    ///
    /// The tolerance is `tolerance_fraction` of the contour's arc length.
    /// The result is detached from the forest. A non-positive tolerance
    /// keeps every point.
    #[must_use = "returns the approximated contour"]
    pub fn approximate_polygon(&self, tolerance_fraction: f64, closed: bool) -> Self {
        let epsilon = tolerance_fraction * self.arc_length(closed);
        Self::detached(simplify(&self.points, epsilon, closed), self.border)
    }

    /// Convex hull vertices as a detached contour with the given winding.
    #[must_use = "returns the hull contour"]
    pub fn convex_hull(&self, orientation: HullOrientation) -> Self {
        Self::detached(self.hull_points(orientation), BorderKind::Outer)
    }

    /// Convex hull as indices into [`points`](Self::points).
    ///
    /// Where a hull vertex occurs more than once in the contour, the
    /// first occurrence is reported.
    #[must_use]
    pub fn convex_hull_indices(&self, orientation: HullOrientation) -> Vec<usize> {
        self.hull_points(orientation)
            .iter()
            .filter_map(|h| self.points.iter().position(|p| p == h))
            .collect()
    }

    fn hull_points(&self, orientation: HullOrientation) -> Vec<Point<i32>> {
        if self.points.is_empty() {
            return Vec::new();
        }
        let mut hull = imageproc::geometry::convex_hull(self.points.as_slice());
        let clockwise = shoelace(&hull) >= 0.0;
        if clockwise != (orientation == HullOrientation::Clockwise) {
            hull.reverse();
        }
        hull
    }

    /// Pixel-covering axis-aligned bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPointSet`] for a contour with no points.
    pub fn bounding_rectangle(&self) -> Result<Rectangle, GeometryError> {
        Rectangle::from_bounding_box(&self.points)
    }
}

#[allow(clippy::cast_precision_loss)]
fn shoelace(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y))
        .sum();
    twice as f64 / 2.0
}

/// Every contour traced from one mask, addressed by [`ContourId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContourForest {
    contours: Vec<Contour>,
}

impl ContourForest {
    /// Trace the borders of the non-zero regions of `mask`.
    ///
    /// Regions touching the image edge are traced as if the mask were
    /// surrounded by background, so points never leave the mask bounds.
    #[must_use]
    pub fn extract(mask: &GrayImage, mode: ContourMode) -> Self {
        let traced = trace_padded(mask);

        let forest = match mode {
            ContourMode::External => Self {
                contours: traced
                    .into_iter()
                    .filter(|c| c.parent.is_none())
                    .map(|c| Contour::detached(c.points, border_kind(c.border_type)))
                    .collect(),
            },
            ContourMode::List => Self {
                contours: traced
                    .into_iter()
                    .map(|c| Contour::detached(c.points, border_kind(c.border_type)))
                    .collect(),
            },
            ContourMode::Tree => {
                let parents: Vec<Option<usize>> = traced.iter().map(|c| c.parent).collect();
                let mut contours: Vec<Contour> = traced
                    .into_iter()
                    .map(|c| Contour::detached(c.points, border_kind(c.border_type)))
                    .collect();
                link_by_parent(&mut contours, &parents);
                Self { contours }
            }
        };

        tracing::debug!(
            mode = ?mode,
            contours = forest.len(),
            "extracted contours"
        );
        forest
    }

    /// Build a forest from point lists and a raw `[next, prev, child,
    /// parent]` table, where `-1` marks an absent link.
    ///
    /// Border kinds alternate with nesting depth: roots are outer
    /// borders, their children holes, and so on. Sibling links may close
    /// into a ring.
    ///
    /// # Errors
    ///
    /// Returns a [`ContourError`] if the table length differs from the
    /// number of contours, an index is out of range, or a `parent` chain
    /// loops.
    pub fn from_raw_hierarchy(
        points: Vec<Vec<Point<i32>>>,
        hierarchy: &[[i32; 4]],
    ) -> Result<Self, ContourError> {
        if points.len() != hierarchy.len() {
            return Err(ContourError::LengthMismatch {
                contours: points.len(),
                hierarchy: hierarchy.len(),
            });
        }

        let count = points.len();
        let resolve = |contour: usize, raw: i32| -> Result<Option<ContourId>, ContourError> {
            if raw == -1 {
                return Ok(None);
            }
            usize::try_from(raw)
                .ok()
                .filter(|&i| i < count)
                .map(|i| Some(ContourId(i)))
                .ok_or(ContourError::IndexOutOfRange { contour, index: raw })
        };

        let mut contours = Vec::with_capacity(count);
        for (i, (pts, [next, prev, child, parent])) in points.into_iter().zip(hierarchy).enumerate()
        {
            contours.push(Contour {
                points: pts,
                border: BorderKind::Outer,
                next: resolve(i, *next)?,
                prev: resolve(i, *prev)?,
                child: resolve(i, *child)?,
                parent: resolve(i, *parent)?,
            });
        }

        let mut forest = Self { contours };
        for i in 0..count {
            forest.check_parent_chain(i)?;
        }
        for i in 0..count {
            let depth = forest.ancestors(ContourId(i)).count();
            forest.contours[i].border = if depth % 2 == 0 {
                BorderKind::Outer
            } else {
                BorderKind::Hole
            };
        }
        Ok(forest)
    }

    /// Fail if the parents of `start` eventually lead back into a loop.
    fn check_parent_chain(&self, start: usize) -> Result<(), ContourError> {
        let mut steps = 0;
        let mut cursor = self.contours[start].parent;
        while let Some(id) = cursor {
            steps += 1;
            if steps > self.contours.len() {
                return Err(ContourError::Cycle { contour: start });
            }
            cursor = self.contours[id.0].parent;
        }
        Ok(())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.contours.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ContourId) -> Option<&Contour> {
        self.contours.get(id.0)
    }

    /// All contours in extraction order.
    #[must_use]
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContourId, &Contour)> {
        self.contours
            .iter()
            .enumerate()
            .map(|(i, c)| (ContourId(i), c))
    }

    /// Contours with no enclosing parent, in extraction order.
    pub fn roots(&self) -> impl Iterator<Item = ContourId> + '_ {
        self.iter()
            .filter(|(_, c)| c.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Direct children of `id`: its first child followed by that
    /// child's `next` siblings, stopping where a sibling ring closes.
    /// Empty in flat modes.
    pub fn children(&self, id: ContourId) -> impl Iterator<Item = ContourId> + '_ {
        let first = self.get(id).and_then(Contour::child);
        std::iter::successors(first, move |c| {
            self.get(*c)
                .and_then(Contour::next)
                .filter(|n| Some(*n) != first)
        })
        .take(self.contours.len())
    }

    /// Enclosing contours of `id`, innermost first.
    pub fn ancestors(&self, id: ContourId) -> impl Iterator<Item = ContourId> + '_ {
        let first = self.get(id).and_then(Contour::parent);
        std::iter::successors(first, |c| self.get(*c).and_then(Contour::parent))
    }
}

impl<'a> IntoIterator for &'a ContourForest {
    type Item = &'a Contour;
    type IntoIter = std::slice::Iter<'a, Contour>;

    fn into_iter(self) -> Self::IntoIter {
        self.contours.iter()
    }
}

/// Trace `mask` inside a one-pixel background frame and shift the
/// points back into mask coordinates.
fn trace_padded(mask: &GrayImage) -> Vec<imageproc::contours::Contour<i32>> {
    let mut padded = GrayImage::new(mask.width() + 2, mask.height() + 2);
    image::imageops::replace(&mut padded, mask, 1, 1);

    let mut traced = imageproc::contours::find_contours::<i32>(&padded);
    for contour in &mut traced {
        for p in &mut contour.points {
            *p = Point::new(p.x - 1, p.y - 1);
        }
    }
    traced
}

const fn border_kind(border: BorderType) -> BorderKind {
    match border {
        BorderType::Outer => BorderKind::Outer,
        BorderType::Hole => BorderKind::Hole,
    }
}

fn link_siblings(group: &[usize], contours: &mut [Contour]) {
    for pair in group.windows(2) {
        contours[pair[0]].next = Some(ContourId(pair[1]));
        contours[pair[1]].prev = Some(ContourId(pair[0]));
    }
}

/// Populate sibling and child links from each contour's parent index.
///
/// Siblings are ordered by extraction order; roots are siblings of each
/// other. The first sibling has no `prev` and the last no `next`.
fn link_by_parent(contours: &mut [Contour], parents: &[Option<usize>]) {
    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); contours.len()];
    for (i, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) if *p < contours.len() => {
                children[*p].push(i);
                contours[i].parent = Some(ContourId(*p));
            }
            _ => roots.push(i),
        }
    }

    link_siblings(&roots, contours);
    for (p, group) in children.iter().enumerate() {
        contours[p].child = group.first().map(|&c| ContourId(c));
        link_siblings(group, contours);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square(x0: i32, y0: i32, side: i32) -> Contour {
        Contour::new(vec![
            Point::new(x0, y0),
            Point::new(x0 + side, y0),
            Point::new(x0 + side, y0 + side),
            Point::new(x0, y0 + side),
        ])
    }

    /// Filled white square with a black square hole and a white island
    /// inside the hole.
    fn nested_mask() -> GrayImage {
        GrayImage::from_fn(40, 40, |x, y| {
            let inside = |lo: u32, hi: u32| (lo..hi).contains(&x) && (lo..hi).contains(&y);
            if inside(16, 24) || (inside(4, 36) && !inside(10, 30)) {
                image::Luma([255])
            } else {
                image::Luma([0])
            }
        })
    }

    #[test]
    fn default_mode_is_external() {
        assert_eq!(ContourMode::default(), ContourMode::External);
        assert!(!ContourMode::External.is_hierarchical());
        assert!(ContourMode::Tree.is_hierarchical());
    }

    #[test]
    fn signed_area_follows_winding() {
        let cw = square(0, 0, 10);
        assert!((cw.signed_area() - 100.0).abs() < 1e-9);

        let ccw = Contour::new(cw.points().iter().rev().copied().collect());
        assert!((ccw.signed_area() + 100.0).abs() < 1e-9);
        assert!((ccw.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn area_of_degenerate_contours_is_zero() {
        assert!(Contour::new(vec![]).area().abs() < 1e-12);
        assert!(
            Contour::new(vec![Point::new(0, 0), Point::new(5, 5)])
                .area()
                .abs()
                < 1e-12
        );
    }

    #[test]
    fn arc_length_open_and_closed() {
        let c = square(0, 0, 10);
        assert!((c.arc_length(false) - 30.0).abs() < 1e-9);
        assert!((c.arc_length(true) - 40.0).abs() < 1e-9);
        assert!(Contour::new(vec![Point::new(1, 1)]).arc_length(true).abs() < 1e-12);
    }

    #[test]
    fn approximate_polygon_drops_collinear_points() {
        let mut points = Vec::new();
        for x in 0..10 {
            points.push(Point::new(x, 0));
        }
        for y in 0..10 {
            points.push(Point::new(10, y));
        }
        for x in (1..=10).rev() {
            points.push(Point::new(x, 10));
        }
        for y in (1..=10).rev() {
            points.push(Point::new(0, y));
        }
        let contour = Contour::new(points);
        let approx = contour.approximate_polygon(0.02, true);
        assert_eq!(approx.len(), 4, "got {:?}", approx.points());
        assert_eq!(approx.next(), None);
        assert_eq!(approx.parent(), None);

        let rect = Rectangle::from_contour(&approx, crate::rectangle::CandidateMode::Average);
        assert_eq!(rect.unwrap(), Rectangle::new(0, 0, 10, 10).unwrap());
    }

    #[test]
    fn approximate_polygon_with_zero_tolerance_keeps_points() {
        let c = square(0, 0, 10);
        assert_eq!(c.approximate_polygon(0.0, true).points(), c.points());
    }

    #[test]
    fn convex_hull_skips_interior_points() {
        let c = Contour::new(vec![
            Point::new(0, 0),
            Point::new(5, 5),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ]);
        let hull = c.convex_hull(HullOrientation::Clockwise);
        assert_eq!(hull.len(), 4);
        assert!(!hull.points().contains(&Point::new(5, 5)));
        assert!(hull.signed_area() > 0.0);

        let ccw = c.convex_hull(HullOrientation::CounterClockwise);
        assert!(ccw.signed_area() < 0.0);
    }

    #[test]
    fn convex_hull_indices_point_into_contour() {
        let c = Contour::new(vec![
            Point::new(0, 0),
            Point::new(5, 5),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ]);
        let mut indices = c.convex_hull_indices(HullOrientation::Clockwise);
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 2, 3, 4]);
    }

    #[test]
    fn bounding_rectangle_matches_rectangle_constructor() {
        let c = square(3, 4, 5);
        assert_eq!(
            c.bounding_rectangle().unwrap(),
            Rectangle::from_bounding_box(c.points()).unwrap()
        );
        assert!(Contour::new(vec![]).bounding_rectangle().is_err());
    }

    #[test]
    fn external_mode_keeps_only_outer_border() {
        let forest = ContourForest::extract(&nested_mask(), ContourMode::External);
        assert_eq!(forest.len(), 1);
        let only = &forest.contours()[0];
        assert_eq!(only.border(), BorderKind::Outer);
        assert_eq!(only.next(), None);
        assert_eq!(only.child(), None);
        assert_eq!(
            only.bounding_rectangle().unwrap(),
            Rectangle::new(4, 4, 36, 36).unwrap()
        );
    }

    #[test]
    fn list_mode_is_flat() {
        let forest = ContourForest::extract(&nested_mask(), ContourMode::List);
        assert_eq!(forest.len(), 3);
        for contour in &forest {
            assert_eq!(contour.next(), None);
            assert_eq!(contour.prev(), None);
            assert_eq!(contour.child(), None);
            assert_eq!(contour.parent(), None);
        }
    }

    #[test]
    fn tree_mode_links_nesting() {
        let forest = ContourForest::extract(&nested_mask(), ContourMode::Tree);
        assert_eq!(forest.len(), 3);

        let roots: Vec<ContourId> = forest.roots().collect();
        assert_eq!(roots.len(), 1);
        let outer = roots[0];

        let holes: Vec<ContourId> = forest.children(outer).collect();
        assert_eq!(holes.len(), 1);
        let hole = holes[0];
        assert_eq!(forest.get(hole).unwrap().border(), BorderKind::Hole);
        assert_eq!(forest.get(hole).unwrap().parent(), Some(outer));

        let islands: Vec<ContourId> = forest.children(hole).collect();
        assert_eq!(islands.len(), 1);
        assert_eq!(forest.ancestors(islands[0]).collect::<Vec<_>>(), vec![hole, outer]);
    }

    #[test]
    fn tree_mode_links_root_siblings() {
        let mask = GrayImage::from_fn(30, 10, |x, y| {
            let column = (2..8).contains(&x) || (12..18).contains(&x) || (22..28).contains(&x);
            if (2..8).contains(&y) && column {
                image::Luma([255])
            } else {
                image::Luma([0])
            }
        });
        let forest = ContourForest::extract(&mask, ContourMode::Tree);
        assert_eq!(forest.len(), 3);

        let roots: Vec<ContourId> = forest.roots().collect();
        assert_eq!(roots.len(), 3);
        let first = forest.get(roots[0]).unwrap();
        let last = forest.get(roots[2]).unwrap();
        assert_eq!(first.prev(), None);
        assert_eq!(first.next(), Some(roots[1]));
        assert_eq!(last.prev(), Some(roots[1]));
        assert_eq!(last.next(), None);
    }

    #[test]
    fn empty_mask_has_no_contours() {
        let forest = ContourForest::extract(&GrayImage::new(10, 10), ContourMode::Tree);
        assert!(forest.is_empty());
    }

    #[test]
    fn raw_hierarchy_maps_minus_one_to_absent() {
        let points = vec![square(0, 0, 20).points().to_vec(), square(5, 5, 5).points().to_vec()];
        let forest =
            ContourForest::from_raw_hierarchy(points, &[[-1, -1, 1, -1], [-1, -1, -1, 0]]).unwrap();

        let outer = forest.get(ContourId(0)).unwrap();
        assert_eq!(outer.child(), Some(ContourId(1)));
        assert_eq!(outer.parent(), None);
        assert_eq!(outer.border(), BorderKind::Outer);

        let inner = forest.get(ContourId(1)).unwrap();
        assert_eq!(inner.parent(), Some(ContourId(0)));
        assert_eq!(inner.border(), BorderKind::Hole);
    }

    #[test]
    fn raw_hierarchy_rejects_bad_tables() {
        let one = || vec![square(0, 0, 1).points().to_vec()];

        assert!(matches!(
            ContourForest::from_raw_hierarchy(one(), &[]),
            Err(ContourError::LengthMismatch { .. })
        ));
        assert!(matches!(
            ContourForest::from_raw_hierarchy(one(), &[[3, -1, -1, -1]]),
            Err(ContourError::IndexOutOfRange { index: 3, .. })
        ));
        assert!(matches!(
            ContourForest::from_raw_hierarchy(one(), &[[-1, -1, -1, 0]]),
            Err(ContourError::Cycle { contour: 0 })
        ));
    }

    #[test]
    fn raw_hierarchy_accepts_sibling_ring() {
        let points = vec![
            square(0, 0, 5).points().to_vec(),
            square(10, 0, 5).points().to_vec(),
            square(20, 0, 5).points().to_vec(),
        ];
        let ring = [[1, 2, -1, -1], [2, 0, -1, -1], [0, 1, -1, -1]];
        let forest = ContourForest::from_raw_hierarchy(points, &ring).unwrap();

        assert_eq!(forest.roots().count(), 3);
        assert_eq!(forest.get(ContourId(2)).unwrap().next(), Some(ContourId(0)));
        assert_eq!(forest.get(ContourId(0)).unwrap().prev(), Some(ContourId(2)));
    }

    #[test]
    fn children_stop_where_ring_closes() {
        let points = vec![
            square(0, 0, 40).points().to_vec(),
            square(5, 5, 5).points().to_vec(),
            square(20, 5, 5).points().to_vec(),
        ];
        let table = [[-1, -1, 1, -1], [2, 2, -1, 0], [1, 1, -1, 0]];
        let forest = ContourForest::from_raw_hierarchy(points, &table).unwrap();

        let kids: Vec<ContourId> = forest.children(ContourId(0)).collect();
        assert_eq!(kids, vec![ContourId(1), ContourId(2)]);
        assert_eq!(forest.get(ContourId(2)).unwrap().border(), BorderKind::Hole);
    }

    #[test]
    fn region_touching_top_edge_is_traced() {
        let mask = GrayImage::from_fn(100, 100, |_, y| {
            if y < 15 { image::Luma([255]) } else { image::Luma([0]) }
        });
        let forest = ContourForest::extract(&mask, ContourMode::External);
        assert_eq!(forest.len(), 1);
        assert_eq!(
            forest.contours()[0].bounding_rectangle().unwrap(),
            Rectangle::new(0, 0, 100, 15).unwrap()
        );
    }

    #[test]
    fn full_mask_is_one_frame_sized_contour() {
        let mask = GrayImage::from_pixel(12, 8, image::Luma([255]));
        let forest = ContourForest::extract(&mask, ContourMode::List);
        assert_eq!(forest.len(), 1);
        let only = &forest.contours()[0];
        assert_eq!(only.border(), BorderKind::Outer);
        assert_eq!(
            only.bounding_rectangle().unwrap(),
            Rectangle::new(0, 0, 12, 8).unwrap()
        );
    }

    #[test]
    fn frame_edge_ring_keeps_outer_border() {
        let mask = GrayImage::from_fn(20, 20, |x, y| {
            let edge = x < 2 || y < 2 || x >= 18 || y >= 18;
            if edge { image::Luma([255]) } else { image::Luma([0]) }
        });

        let external = ContourForest::extract(&mask, ContourMode::External);
        assert_eq!(external.len(), 1);
        assert_eq!(
            external.contours()[0].bounding_rectangle().unwrap(),
            Rectangle::new(0, 0, 20, 20).unwrap()
        );

        let tree = ContourForest::extract(&mask, ContourMode::Tree);
        assert_eq!(tree.len(), 2);
        let outer = tree.roots().next().unwrap();
        let hole: Vec<ContourId> = tree.children(outer).collect();
        assert_eq!(hole.len(), 1);
        assert_eq!(tree.get(hole[0]).unwrap().border(), BorderKind::Hole);
    }
}
