// globe.rs - Graticule globe, the expensive module behind LazyModule

const LINE_STEP_DEG: f64 = 10.0;       // Spacing between meridians/parallels
const SAMPLE_STEP_DEG: f64 = 0.25;     // Spacing of points along a line

/// Points on the unit sphere, `[x, y, z]` with `y` towards the north pole.
#[derive(Debug, Clone)]
pub struct GlobeModel {
    points: Vec<[f64; 3]>,
}

fn to_cartesian(lat_deg: f64, lon_deg: f64) -> [f64; 3] {
    let (lat, lon) = (lat_deg.to_radians(), lon_deg.to_radians());
    [lat.cos() * lon.sin(), lat.sin(), lat.cos() * lon.cos()]
}

impl GlobeModel {
    /// Sample every meridian and parallel of the graticule.
    pub fn build() -> Self {
        let samples = |span: f64| (span / SAMPLE_STEP_DEG) as usize;
        let mut points = Vec::new();

        let meridians = (360.0 / LINE_STEP_DEG) as usize;
        for m in 0..meridians {
            let lon = m as f64 * LINE_STEP_DEG - 180.0;
            for s in 0..=samples(180.0) {
                points.push(to_cartesian(s as f64 * SAMPLE_STEP_DEG - 90.0, lon));
            }
        }

        let parallels = (180.0 / LINE_STEP_DEG) as usize;
        for p in 1..parallels {
            let lat = p as f64 * LINE_STEP_DEG - 90.0;
            for s in 0..samples(360.0) {
                points.push(to_cartesian(lat, s as f64 * SAMPLE_STEP_DEG - 180.0));
            }
        }

        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Orthographic projection after spinning the globe by `rotation_deg`
    /// around its axis. Only the facing hemisphere is returned; coordinates
    /// are in `[-1, 1]` with `y` pointing up.
    pub fn project(&self, rotation_deg: f64) -> Vec<(f32, f32)> {
        let (sin, cos) = rotation_deg.to_radians().sin_cos();
        self.points
            .iter()
            .filter_map(|&[x, y, z]| {
                let rx = x * cos + z * sin;
                let rz = -x * sin + z * cos;
                (rz >= 0.0).then_some((rx as f32, y as f32))
            })
            .collect()
    }
}
