//! Small vector/quaternion helpers over plain arrays.
//! - Vec3 is `[x, y, z]`, Quat is `[x, y, z, w]`
//! - Euler angles use XYZ order
//! - slerp/nlerp take the shortest arc

pub type Vec3 = [f32; 3];
pub type Quat = [f32; 4];

pub const QUAT_IDENTITY: Quat = [0.0, 0.0, 0.0, 1.0];
pub const UP: Vec3 = [0.0, 1.0, 0.0];

#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn add3(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn sub3(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn scale3(v: Vec3, s: f32) -> Vec3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

#[inline]
pub fn dot3(a: Vec3, b: Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross3(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn length3(v: Vec3) -> f32 {
    dot3(v, v).sqrt()
}

/// Unit vector along `v`, or None for (near) zero length.
#[inline]
pub fn normalize3(v: Vec3) -> Option<Vec3> {
    let len = length3(v);
    if len.is_nan() || len <= 1e-6 {
        None
    } else {
        Some(scale3(v, len.recip()))
    }
}

#[inline]
pub fn dot4(a: Quat, b: Quat) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
pub fn normalize4(mut q: Quat) -> Quat {
    let len2 = dot4(q, q);
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        q[0] *= inv_len;
        q[1] *= inv_len;
        q[2] *= inv_len;
        q[3] *= inv_len;
    }
    q
}

#[inline]
fn negate4(q: Quat) -> Quat {
    [-q[0], -q[1], -q[2], -q[3]]
}

/// Quaternion NLERP with shortest-arc correction.
#[inline]
pub fn nlerp_quat(a: Quat, mut b: Quat, t: f32) -> Quat {
    if dot4(a, b) < 0.0 {
        b = negate4(b);
    }
    normalize4([
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
        lerp_f32(a[3], b[3], t),
    ])
}

/// Spherical interpolation; falls back to NLERP for nearly parallel inputs.
pub fn slerp_quat(a: Quat, mut b: Quat, t: f32) -> Quat {
    let mut cos = dot4(a, b);
    if cos < 0.0 {
        b = negate4(b);
        cos = -cos;
    }
    if cos > 0.9995 {
        return nlerp_quat(a, b, t);
    }
    let theta = cos.clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();
    let wa = ((1.0 - t) * theta).sin() / sin_theta;
    let wb = (t * theta).sin() / sin_theta;
    normalize4([
        a[0] * wa + b[0] * wb,
        a[1] * wa + b[1] * wb,
        a[2] * wa + b[2] * wb,
        a[3] * wa + b[3] * wb,
    ])
}

/// Hamilton product `a * b` (apply b, then a).
#[inline]
pub fn mul_quat(a: Quat, b: Quat) -> Quat {
    [
        a[3] * b[0] + a[0] * b[3] + a[1] * b[2] - a[2] * b[1],
        a[3] * b[1] - a[0] * b[2] + a[1] * b[3] + a[2] * b[0],
        a[3] * b[2] + a[0] * b[1] - a[1] * b[0] + a[2] * b[3],
        a[3] * b[3] - a[0] * b[0] - a[1] * b[1] - a[2] * b[2],
    ]
}

/// Rotate a vector by a unit quaternion.
#[inline]
pub fn rotate3(q: Quat, v: Vec3) -> Vec3 {
    let u = [q[0], q[1], q[2]];
    let t = scale3(cross3(u, v), 2.0);
    add3(add3(v, scale3(t, q[3])), cross3(u, t))
}

/// Quaternion for XYZ-ordered Euler angles (radians).
pub fn quat_from_euler(e: Vec3) -> Quat {
    let (s1, c1) = (e[0] * 0.5).sin_cos();
    let (s2, c2) = (e[1] * 0.5).sin_cos();
    let (s3, c3) = (e[2] * 0.5).sin_cos();
    [
        s1 * c2 * c3 + c1 * s2 * s3,
        c1 * s2 * c3 - s1 * c2 * s3,
        c1 * c2 * s3 + s1 * s2 * c3,
        c1 * c2 * c3 - s1 * s2 * s3,
    ]
}

/// XYZ-ordered Euler angles for a unit quaternion.
pub fn euler_from_quat(q: Quat) -> Vec3 {
    let [x, y, z, w] = q;
    let m11 = 1.0 - 2.0 * (y * y + z * z);
    let m12 = 2.0 * (x * y - z * w);
    let m13 = 2.0 * (x * z + y * w);
    let m22 = 1.0 - 2.0 * (x * x + z * z);
    let m23 = 2.0 * (y * z - x * w);
    let m32 = 2.0 * (y * z + x * w);
    let m33 = 1.0 - 2.0 * (x * x + y * y);

    let ey = m13.clamp(-1.0, 1.0).asin();
    if m13.abs() < 0.999_999 {
        [(-m23).atan2(m33), ey, (-m12).atan2(m11)]
    } else {
        [m32.atan2(m22), ey, 0.0]
    }
}

/// Quaternion from an orthonormal basis given as matrix columns.
pub fn quat_from_basis(x: Vec3, y: Vec3, z: Vec3) -> Quat {
    let (m11, m12, m13) = (x[0], y[0], z[0]);
    let (m21, m22, m23) = (x[1], y[1], z[1]);
    let (m31, m32, m33) = (x[2], y[2], z[2]);
    let trace = m11 + m22 + m33;

    let q = if trace > 0.0 {
        let s = 0.5 / (trace + 1.0).sqrt();
        [(m32 - m23) * s, (m13 - m31) * s, (m21 - m12) * s, 0.25 / s]
    } else if m11 > m22 && m11 > m33 {
        let s = 2.0 * (1.0 + m11 - m22 - m33).sqrt();
        [0.25 * s, (m12 + m21) / s, (m13 + m31) / s, (m32 - m23) / s]
    } else if m22 > m33 {
        let s = 2.0 * (1.0 + m22 - m11 - m33).sqrt();
        [(m12 + m21) / s, 0.25 * s, (m23 + m32) / s, (m13 - m31) / s]
    } else {
        let s = 2.0 * (1.0 + m33 - m11 - m22).sqrt();
        [(m13 + m31) / s, (m23 + m32) / s, 0.25 * s, (m21 - m12) / s]
    };
    normalize4(q)
}

/// Rotation turning local +Z toward `forward`, keeping `up` as close to +Y as possible.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let z = normalize3(forward)?;
    let x = normalize3(cross3(up, z))
        // forward parallel to up: any perpendicular axis will do
        .or_else(|| normalize3(cross3([0.0, 0.0, 1.0], z)))
        .or_else(|| normalize3(cross3([1.0, 0.0, 0.0], z)))?;
    let y = cross3(z, x);
    Some(quat_from_basis(x, y, z))
}
