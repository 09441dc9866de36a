use std::io::Write;

use clap::{Parser, builder::RangedU64ValueParser};
use fasthash64::{
    family::{Family, FAMILIES},
    stats::{
        compute_stats, generate_8_random_bits, generate_bit_combinations, generate_counting,
        generate_gray_code, generate_random, generate_single_1_bit,
    },
};

/// One input length per FarmHash length branch, on both sides of each
/// boundary.
const DEFAULT_LENGTHS: [usize; 13] = [1, 4, 8, 16, 17, 32, 33, 64, 65, 96, 97, 256, 257];

#[derive(Parser)]
#[command(about = "Avalanche and bit independence statistics for the 64-bit hashes")]
struct Args {
    /// Only test families whose name contains one of these (case-insensitive).
    filters: Vec<String>,

    /// Also measure the bit independence criterion.  Slow, and memory use
    /// grows with the input length.
    #[arg(long)]
    bic: bool,

    /// Write an avalanche chart PNG for every family, length and pattern.
    #[arg(long)]
    png: bool,

    /// Rounds per input pattern.  At least one, or there is nothing to report.
    #[arg(
        long,
        default_value_t = 4096,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    rounds: usize,

    /// Input lengths to test, in bytes.
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_LENGTHS)]
    lengths: Vec<usize>,

    /// Hash through the seeded entry points with this seed.
    #[arg(long)]
    seed: Option<u64>,
}

enum Rounds {
    /// `--rounds`.
    Configured,

    /// One round per input bit.
    InputBits,
}

struct BitPattern<'a> {
    name: &'a str,
    gen_function: &'a dyn Fn(usize, &mut [u8]),
    rounds: Rounds,
}

const PATTERNS: &[BitPattern] = &[
    BitPattern {
        name: "random",
        gen_function: &generate_random,
        rounds: Rounds::Configured,
    },
    BitPattern {
        name: "counting",
        gen_function: &generate_counting,
        rounds: Rounds::Configured,
    },
    BitPattern {
        name: "gray code",
        gen_function: &generate_gray_code,
        rounds: Rounds::Configured,
    },
    BitPattern {
        name: "bit combinations",
        gen_function: &generate_bit_combinations,
        rounds: Rounds::Configured,
    },
    BitPattern {
        name: "8 random bits",
        gen_function: &generate_8_random_bits,
        rounds: Rounds::Configured,
    },
    BitPattern {
        name: "single-bit",
        gen_function: &generate_single_1_bit,

        // NOTE: because this test has a small, fixed number of rounds by its
        // nature, the generated statistics should be interpreted a little
        // differently. In particular, even a very good hash is unlikely to
        // achieve "perfect" avalanche or BIC by this measure, purely because
        // it's impossible to collect enough samples to reduce variance enough.
        rounds: Rounds::InputBits,
    },
];

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let families: Vec<&Family> = FAMILIES
        .iter()
        .filter(|family| args.filters.is_empty() || args.filters.iter().any(|f| family.matches(f)))
        .collect();

    for family in families {
        println!("\n================================");
        match (args.seed, family.hash_with_seed) {
            (Some(seed), Some(_)) => println!("{} (seed {:#x})", family.name, seed),
            (Some(_), None) => println!("{} (unseeded, ignoring --seed)", family.name),
            (None, _) => println!("{}", family.name),
        }

        for &len in &args.lengths {
            if len == 0 {
                println!("\nSkipping zero-length input: there are no bits to flip.");
                continue;
            }

            for pattern in PATTERNS.iter() {
                println!("\nInput: {} bytes, bit pattern: {}", len, pattern.name);
                let rounds = match pattern.rounds {
                    Rounds::Configured => args.rounds,
                    Rounds::InputBits => len * 8,
                };

                let stats = compute_stats(
                    pattern.gen_function,
                    |s: &[u8]| family.hash_seeded(s, args.seed),
                    len,
                    rounds,
                    true,
                    args.bic,
                    |round| {
                        print!(
                            "\r                                                  \rRound {}/{}",
                            round, rounds
                        );
                        let _ = std::io::stdout().flush();
                    },
                );
                print!("\r                                                  \r");

                stats.print_report();
                if args.png {
                    stats.write_avalanche_png(format!(
                        "{} - {} bytes - {}.png",
                        family.name, len, pattern.name
                    ))?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rounds_rejected() {
        assert!(Args::try_parse_from(["avalanche", "--rounds", "0"]).is_err());
        let args = Args::try_parse_from(["avalanche", "--rounds", "1"]).unwrap();
        assert_eq!(args.rounds, 1);
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["avalanche", "farm"]).unwrap();
        assert_eq!(args.rounds, 4096);
        assert_eq!(args.lengths, DEFAULT_LENGTHS);
        assert_eq!(args.filters, ["farm"]);
        assert_eq!(args.seed, None);
    }
}
