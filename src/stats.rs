//! Avalanche and bit-independence statistics for 64-bit hash functions.

use std::{fs::File, path::Path};

use nanorand::{Rng, WyRand};

/// Width of every hash output, in bits.
pub const OUTPUT_BIT_LEN: usize = 64;

pub struct Stats {
    pub input_bit_len: usize,
    pub output_bit_len: usize,

    // The number of samples accumulated.  Or put another way, the number of
    // rounds used to generate the chart.
    pub sample_count: usize,

    // `input_bit_len * output_bit_len` long.  Each element is a count of the
    // number of bit flips for a given in/out bit pairing.
    pub avalanche_chart: Vec<u32>,

    // For every input bit, the BIC quadrants for each pair of output bits.
    pub bic_chart: Vec<[u32; 4]>,
}

impl Stats {
    pub fn new(input_bit_len: usize, do_avalanche: bool, do_bic: bool) -> Self {
        let output_bit_len = OUTPUT_BIT_LEN;
        Self {
            input_bit_len,
            output_bit_len,
            sample_count: 0,
            avalanche_chart: if do_avalanche {
                vec![0; input_bit_len * output_bit_len]
            } else {
                Vec::new()
            },
            bic_chart: if do_bic {
                vec![[0; 4]; input_bit_len * output_bit_len * (output_bit_len - 1)]
            } else {
                Vec::new()
            },
        }
    }

    pub fn accumulate(&mut self, in_bit: usize, out_bit: usize, flipped: bool) {
        self.avalanche_chart[in_bit * self.output_bit_len + out_bit] += flipped as u32;
    }

    pub fn get(&self, in_bit: usize, out_bit: usize) -> u32 {
        self.avalanche_chart[in_bit * self.output_bit_len + out_bit]
    }

    pub fn get_row(&self, in_bit: usize) -> &[u32] {
        let start = in_bit * self.output_bit_len;
        let end = start + self.output_bit_len;
        &self.avalanche_chart[start..end]
    }

    /// Fraction of all (sample, input bit, output bit) triples where the
    /// output bit flipped.  Ideally 0.5.
    pub fn flip_rate(&self) -> f64 {
        let flips: u64 = self.avalanche_chart.iter().map(|&f| f as u64).sum();
        flips as f64 / (self.avalanche_chart.len() * self.sample_count) as f64
    }

    pub fn row_diffusion(&self, in_bit: usize) -> f64 {
        let norm = 1.0 / self.sample_count as f64;
        self.get_row(in_bit)
            .iter()
            .map(|&flips| 1.0 - p_to_bias(flips as f64 * norm))
            .sum()
    }

    pub fn row_entropy(&self, in_bit: usize) -> f64 {
        let norm = 1.0 / self.sample_count as f64;
        self.get_row(in_bit)
            .iter()
            .map(|&flips| p_to_entropy(flips as f64 * norm))
            .sum()
    }

    pub fn average_bias(&self) -> f64 {
        let norm = 1.0 / self.sample_count as f64;

        let bias_sum: f64 = self
            .avalanche_chart
            .iter()
            .map(|&flips| p_to_bias(flips as f64 * norm))
            .sum();
        bias_sum / self.avalanche_chart.len() as f64
    }

    pub fn min_bias(&self) -> f64 {
        let norm = 1.0 / self.sample_count as f64;

        let mut min_bias = 1.0f64;
        for &flips in &self.avalanche_chart {
            let bias = p_to_bias(flips as f64 * norm);
            min_bias = min_bias.min(bias);
        }
        min_bias
    }

    pub fn max_bias(&self) -> f64 {
        let norm = 1.0 / self.sample_count as f64;

        let mut max_bias = 0.0f64;
        for &flips in &self.avalanche_chart {
            let bias = p_to_bias(flips as f64 * norm);
            max_bias = max_bias.max(bias);
        }
        max_bias
    }

    pub fn min_input_bit_diffusion(&self) -> f64 {
        (0..self.input_bit_len)
            .map(|i| self.row_diffusion(i))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn avg_input_bit_diffusion(&self) -> f64 {
        let sum: f64 = (0..self.input_bit_len).map(|i| self.row_diffusion(i)).sum();
        sum / self.input_bit_len as f64
    }

    pub fn max_input_bit_diffusion(&self) -> f64 {
        (0..self.input_bit_len)
            .map(|i| self.row_diffusion(i))
            .fold(0.0, f64::max)
    }

    pub fn min_input_bit_entropy(&self) -> f64 {
        (0..self.input_bit_len)
            .map(|i| self.row_entropy(i))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn avg_input_bit_entropy(&self) -> f64 {
        let sum: f64 = (0..self.input_bit_len).map(|i| self.row_entropy(i)).sum();
        sum / self.input_bit_len as f64
    }

    pub fn max_input_bit_entropy(&self) -> f64 {
        (0..self.input_bit_len)
            .map(|i| self.row_entropy(i))
            .fold(0.0, f64::max)
    }

    pub fn row_bic_avg_sorted_quadrants(&self, in_bit_idx: usize) -> [f64; 4] {
        let stride = self.output_bit_len * (self.output_bit_len - 1);
        let start = in_bit_idx * stride;
        let end = start + stride;
        let bic = &self.bic_chart[start..end];

        let mut sum = [0u64; 4];
        for mut quadrants in bic.iter().copied() {
            quadrants.sort_unstable();
            for (total, count) in sum.iter_mut().zip(quadrants) {
                *total += count as u64;
            }
        }

        let norm = (stride * self.sample_count) as f64;
        sum.map(|total| total as f64 / norm)
    }

    pub fn avg_bic_sorted_quadrants(&self) -> [f64; 4] {
        let mut sum = [0.0; 4];
        for i in 0..self.input_bit_len {
            let n = self.row_bic_avg_sorted_quadrants(i);
            for (total, q) in sum.iter_mut().zip(n) {
                *total += q;
            }
        }
        sum.map(|total| total / self.input_bit_len as f64)
    }

    pub fn worst_bic_sorted_quadrants(&self) -> [f64; 4] {
        let mut worst = [999.0f64, 999.0, 999.0, 0.0];
        for i in 0..self.input_bit_len {
            let n = self.row_bic_avg_sorted_quadrants(i);
            worst[0] = worst[0].min(n[0]);
            worst[1] = worst[1].min(n[1]);
            worst[2] = worst[2].min(n[2]);
            worst[3] = worst[3].max(n[3]);
        }
        worst
    }

    pub fn best_bic_sorted_quadrants(&self) -> [f64; 4] {
        let mut best = [0.0; 4];
        for i in 0..self.input_bit_len {
            let n = self.row_bic_avg_sorted_quadrants(i);
            if n[0] > best[0] {
                best = n;
            }
        }
        best
    }

    pub fn print_report(&self) {
        if !self.avalanche_chart.is_empty() {
            println!(
                "    Flip rate: {:0.4}
    Bias:
        Min: {:0.2}
        Avg: {:0.2}
        Max: {:0.2}
    Input Bit Diffusion (digest size = {} bits):
        Min: {:0.1} bits
        Avg: {:0.1} bits
        Max: {:0.1} bits
    Input Bit Diffusion Entropy (digest size = {} bits):
        Min: {:0.1} bits
        Avg: {:0.1} bits
        Max: {:0.1} bits",
                self.flip_rate(),
                self.min_bias(),
                self.average_bias(),
                self.max_bias(),
                self.output_bit_len,
                self.min_input_bit_diffusion(),
                self.avg_input_bit_diffusion(),
                self.max_input_bit_diffusion(),
                self.output_bit_len,
                self.min_input_bit_entropy(),
                self.avg_input_bit_entropy(),
                self.max_input_bit_entropy(),
            );
        }

        if !self.bic_chart.is_empty() {
            let worst = self.worst_bic_sorted_quadrants();
            let avg = self.avg_bic_sorted_quadrants();
            let best = self.best_bic_sorted_quadrants();

            println!(
                "    BIC quadrants (sorted):
        Wrst: [{:0.4}, {:0.4}, {:0.4}, {:0.4}]
         Avg: [{:0.4}, {:0.4}, {:0.4}, {:0.4}]
        Best: [{:0.4}, {:0.4}, {:0.4}, {:0.4}]",
                worst[0],
                worst[1],
                worst[2],
                worst[3],
                avg[0],
                avg[1],
                avg[2],
                avg[3],
                best[0],
                best[1],
                best[2],
                best[3],
            );
        }
    }

    /// Writes the avalanche chart as a grayscale image, one row per input bit
    /// and one column per output bit.  Mid-gray is ideal.
    pub fn write_avalanche_png<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut pixels = Vec::new();

        for bit in self.avalanche_chart.iter().copied() {
            let v = (bit as u64 * 255 / self.sample_count as u64).min(255) as u8;
            pixels.extend_from_slice(&[v, v, v, 255]);
        }

        png_encode_mini::write_rgba_from_u8(
            &mut File::create(path.as_ref())?,
            &pixels,
            self.output_bit_len as u32,
            self.input_bit_len as u32,
        )?;

        Ok(())
    }
}

/// Computes avalanche/BIC statistics for `hash` over inputs of `input_len`
/// bytes.
///
/// - `generate_input`: function that takes a seed and generates an input.
///   The result should be deterministic based on the seed.  Note that the seed
///   starts from zero, and simply increments each round.
/// - `hash`: the hash function under test.
/// - `input_len`: length of the hashed inputs, in bytes.  Must be non-zero.
/// - `rounds`: how many test rounds to perform to produce the estimated chart.
/// - `on_round`: called with the round index before each round, e.g. for
///   progress output.
pub fn compute_stats<F1, F2, F3>(
    generate_input: F1,
    hash: F2,
    input_len: usize,
    rounds: usize,
    do_avalanche: bool,
    do_bic: bool,
    mut on_round: F3,
) -> Stats
where
    F1: Fn(usize, &mut [u8]),
    F2: Fn(&[u8]) -> u64,
    F3: FnMut(usize),
{
    assert!(input_len > 0, "cannot flip bits of an empty input");

    let mut chart = Stats::new(input_len * 8, do_avalanche, do_bic);
    let out_bits = chart.output_bit_len;

    let mut input = vec![0u8; input_len];
    let mut input_tweaked = vec![0u8; input_len];

    for round in 0..rounds {
        on_round(round);

        generate_input(round, &mut input[..]);
        let output = hash(&input[..]);

        for in_bit_idx in 0..(input_len * 8) {
            input_tweaked.copy_from_slice(&input[..]);
            input_tweaked[in_bit_idx / 8] ^= 1 << (in_bit_idx % 8);
            let diff = output ^ hash(&input_tweaked[..]);

            // Avalanche.
            if do_avalanche {
                for out_bit_idx in 0..out_bits {
                    chart.accumulate(in_bit_idx, out_bit_idx, (diff >> out_bit_idx) & 1 != 0);
                }
            }

            // Bit independence criterion.
            if do_bic {
                let stride = out_bits * (out_bits - 1);
                for i in 0..out_bits {
                    for j in 0..(out_bits - 1) {
                        let i_b = (i + j + 1) % out_bits;

                        let flipped_a = (diff >> i) & 1 != 0;
                        let flipped_b = (diff >> i_b) & 1 != 0;

                        let k = (in_bit_idx * stride) + (i * (out_bits - 1)) + j;
                        let quadrant = match (flipped_a, flipped_b) {
                            (true, true) => 0,
                            (false, false) => 1,
                            (true, false) => 2,
                            (false, true) => 3,
                        };
                        chart.bic_chart[k][quadrant] += 1;
                    }
                }
            }
        }

        chart.sample_count += 1;
    }

    chart
}

pub fn p_to_bias(p: f64) -> f64 {
    (p * 2.0 - 1.0).abs()
}

pub fn p_to_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        0.0
    } else {
        let q = 1.0 - p;
        -(p * p.log2()) - (q * q.log2())
    }
}

//-------------------------------------------------------------

/// Generates a random byte stream.
pub fn generate_random(seed: usize, bytes: &mut [u8]) {
    let mut rng = WyRand::new_seed(mix64(seed as u64));
    rng.fill_bytes(bytes);
}

/// Generates a byte stream with all zero bits except one.
pub fn generate_single_1_bit(index: usize, bytes: &mut [u8]) {
    let bit_idx = index % (bytes.len() * 8);
    let i = bit_idx / 8;
    let byte = 1 << (bit_idx % 8);
    bytes.fill(0);
    bytes[i] = byte;
}

/// Generates a byte stream with roughly `n` random bits set to one.
pub fn generate_n_random_bits(seed: usize, bytes: &mut [u8], n: usize) {
    let mut rng = WyRand::new_seed(mix64(seed as u64 ^ mix64(n as u64)));

    bytes.fill(0);
    for _ in 0..n {
        let n = rng.generate_range(0..(bytes.len() * 8));
        let byte_idx = n / 8;
        let byte_mask = 1 << (n % 8);
        bytes[byte_idx] |= byte_mask;
    }
}

/// Generates a byte stream with roughly 8 random bits set to one.
pub fn generate_8_random_bits(seed: usize, bytes: &mut [u8]) {
    generate_n_random_bits(seed, bytes, 8);
}

/// Generates a byte stream with the lowest bits simply counting up as an
/// incrementing integer.  Inputs shorter than 8 bytes wrap around.
pub fn generate_counting(index: usize, bytes: &mut [u8]) {
    let n = bytes.len().min(8);
    bytes[..n].copy_from_slice(&u64::to_le_bytes(index as u64)[..n]);
    bytes[n..].fill(0);
}

/// Generates a byte stream with the lowest bits simply iterating through gray
/// codes in order.
pub fn generate_gray_code(index: usize, bytes: &mut [u8]) {
    generate_counting(index ^ (index >> 1), bytes);
}

/// Generates all combinations of setting zero bits, then one bit, then two
/// bits, and so on, in that order.
pub fn generate_bit_combinations(index: usize, bytes: &mut [u8]) {
    let bit_len = bytes.len() * 8;

    // Compute the number of bits and the sub-index into that subsequence, for the
    // given index.
    let mut n = if bit_len < usize::BITS as usize {
        // Wrap to the total number of combinations if that's less than usize.
        index % (1 << bit_len)
    } else {
        index
    };
    let mut bits = 0;
    let mut combos = binomial(bit_len, bits);
    while n >= combos {
        n -= combos;
        bits += 1;
        combos = binomial(bit_len, bits);
    }

    // Generate the bits for the computed subsequence and sub-index.
    bytes.fill(0);
    let mut t = bit_len;
    while t > 0 && bits > 0 {
        let y = if t > bits { binomial(t - 1, bits) } else { 0 };

        if n >= y {
            let byte_idx = (t - 1) / 8;
            let byte_mask = 1 << ((t - 1) % 8);
            bytes[byte_idx] |= byte_mask;

            n -= y;
            bits -= 1;
        }

        t -= 1;
    }
}

const fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }

    if k == 0 {
        1
    } else if k > (n / 2) {
        binomial(n, n - k)
    } else {
        n * binomial(n - 1, k - 1) / k
    }
}

/// 64-bit bijective bit mixer.
fn mix64(mut n: u64) -> u64 {
    // Break zero sensitivity.
    n ^= 0x7be355f7c2e736d2;

    // http://zimbry.blogspot.ch/2011/09/better-bit-mixing-improving-on.html
    // (variant "Mix13")
    n ^= n >> 30;
    n = n.wrapping_mul(0xbf58476d1ce4e5b9);
    n ^= n >> 27;
    n = n.wrapping_mul(0x94d049bb133111eb);
    n ^= n >> 31;

    n
}
