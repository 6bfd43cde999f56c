/// Demonstrates tension envelope behavior
/// Shows how the tension control bows each stage between slow and fast start
use tension_env::{Envelope, EnvelopeParams, Stage, MAX_BLOCK_SIZE};

fn main() {
    println!("=== Tension ADSR Envelope Demo ===\n");

    let sample_rate = 48_000.0;
    let params = EnvelopeParams {
        attack_ms: 100.0,
        decay_ms: 100.0,
        sustain_db: -6.0,
        release_ms: 200.0,
        ..EnvelopeParams::default()
    };

    println!("Envelope parameters:");
    println!("  Attack:  {:.0}ms", params.attack_ms);
    println!("  Decay:   {:.0}ms", params.decay_ms);
    println!("  Sustain: {:.1}dB", params.sustain_db);
    println!("  Release: {:.0}ms\n", params.release_ms);

    for &tension in &[-0.75, 0.0, 0.75] {
        println!("--- attack tension {:+.2} ---", tension);

        let mut env = Envelope::with_params(
            sample_rate,
            EnvelopeParams {
                tension_attack: tension,
                ..params
            },
        );
        env.note_on(1.0);

        let attack_samples = (params.attack_ms * 0.001 * sample_rate) as usize;
        let halfway = render_chunks(&mut env, attack_samples / 2);
        println!("  halfway up the attack: level {:.3}", halfway);

        render_chunks(&mut env, attack_samples / 2 + 4);
        println!("  attack complete:       level {:.3} ({:?})", env.level(), env.stage());

        // Hold through decay into sustain, then let go.
        while env.stage() != Stage::Sustain {
            env.next_sample();
        }
        println!("  sustaining at:         level {:.3}", env.level());

        env.note_off();
        let mut released = 0usize;
        while env.is_active() {
            env.next_sample();
            released += 1;
        }
        println!("  released over:         {} samples\n", released);
    }

    println!("Positive tension starts each stage slowly and finishes fast;");
    println!("negative tension does the opposite. Zero stays on the straight line.");
}

/// Render `total` samples in graph-sized chunks, returning the final level.
fn render_chunks(env: &mut Envelope, total: usize) -> f64 {
    let mut remaining = total;
    while remaining > 0 {
        let chunk = remaining.min(MAX_BLOCK_SIZE);
        let mut buffer = vec![0.0; chunk];
        env.render(&mut buffer);
        remaining -= chunk;
    }
    env.level()
}
