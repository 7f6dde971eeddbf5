use crate::foundation::error::{InkError, InkResult};

/// Largest kernel radius accepted; images never have a longer edge.
pub const MAX_KERNEL_RADIUS: u32 = u16::MAX as u32;

/// Kernel radius (in pixels) used for a Gaussian of the given sigma: `ceil(3 * sigma)`.
pub fn kernel_radius(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (3.0 * sigma).ceil() as u32
}

/// Separable Gaussian blur over tightly packed 8-bit pixels with `channels` bytes per pixel.
///
/// Weights are Q16 fixed point and always sum to exactly 1.0, so flat regions stay bit-identical.
/// Edge pixels are clamped. A zero radius returns the input unchanged.
pub fn gaussian_blur_u8(
    src: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    sigma: f32,
) -> InkResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| InkError::render("blur buffer size overflow"))?;
    if channels == 0 || src.len() != expected_len {
        return Err(InkError::render(
            "gaussian_blur_u8 expects src matching width*height*channels",
        ));
    }
    let radius = kernel_radius(sigma);
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    let dims = Dims {
        width: width as i64,
        height: height as i64,
        channels,
    };
    convolve(src, &mut tmp, dims, &kernel, Axis::Horizontal);
    convolve(&tmp, &mut out, dims, &kernel, Axis::Vertical);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> InkResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(InkError::config("blur sigma must be > 0"));
    }

    if radius > MAX_KERNEL_RADIUS {
        return Err(InkError::config(format!(
            "blur sigma {sigma} needs a kernel radius above {MAX_KERNEL_RADIUS}"
        )));
    }
    let r = i32::try_from(radius)
        .map_err(|_| InkError::config(format!("blur kernel radius {radius} out of range")))?;
    let taps = r
        .checked_mul(2)
        .and_then(|v| v.checked_add(1))
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| InkError::config(format!("blur kernel radius {radius} out of range")))?;
    let mut weights_f = Vec::<f64>::with_capacity(taps);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(InkError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push rounding drift into the centre tap.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

#[derive(Clone, Copy)]
struct Dims {
    width: i64,
    height: i64,
    channels: usize,
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn convolve(src: &[u8], dst: &mut [u8], dims: Dims, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i64;
    let Dims {
        width: w,
        height: h,
        channels,
    } = dims;
    let mut acc = vec![0u64; channels];
    for y in 0..h {
        for x in 0..w {
            acc.fill(0);
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i64 - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => ((x + d).clamp(0, w - 1), y),
                    Axis::Vertical => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * channels;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * channels;
            for (c, a) in acc.iter().enumerate() {
                dst[out_idx + c] = q16_to_u8(*a);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
