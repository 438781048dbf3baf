//! Closed-form 3x3 linear solve.

/// Determinants with a magnitude below this are treated as singular.
pub const SINGULAR_DETERMINANT: f64 = 1e-10;

#[inline]
fn det3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Solve `m * x = rhs` with Cramer's rule.
///
/// Returns `None` when `|det(m)| < SINGULAR_DETERMINANT`.
pub fn solve3(m: &[[f64; 3]; 3], rhs: &[f64; 3]) -> Option<[f64; 3]> {
    let det = det3(m);
    if det.abs() < SINGULAR_DETERMINANT {
        return None;
    }

    let mut x = [0.0; 3];
    for (col, out) in x.iter_mut().enumerate() {
        let mut replaced = *m;
        for row in 0..3 {
            replaced[row][col] = rhs[row];
        }
        *out = det3(&replaced) / det;
    }
    Some(x)
}
