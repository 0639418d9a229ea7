use std::io;
use std::process::ExitCode;
use std::time::Duration;

use engine::profiling::{Profiler, TickTimings, TimingSummary};
use engine::surface::{RgbaBufferSurface, Surface, SurfaceSize, draw_frame};

use wristflap::input::sim::{ScriptedHand, SyntheticCamera};
use wristflap::{ConfigStore, GameError, GameLoop, TickOutcome};

const DEFAULT_TICKS: u64 = 600;
const HAND_PERIOD_TICKS: u32 = 240;
const HAND_AMPLITUDE: f32 = 0.3;

const HELP: &str = "\
headless: run wristflap without a window

USAGE:
    headless [--headless-ticks N]

OPTIONS:
    --headless-ticks N   simulated ticks before quitting (default 600)
    -h, --help           print this help

A scripted hand bobs up and down in front of a synthetic camera. Tunables come from
WRISTFLAP_CONFIG or $XDG_CONFIG_HOME/wristflap/config.json.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeadlessCli {
    help: bool,
    ticks: u64,
}

fn parse_cli(args: impl IntoIterator<Item = String>) -> io::Result<HeadlessCli> {
    let mut cli = HeadlessCli {
        help: false,
        ticks: DEFAULT_TICKS,
    };
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => cli.help = true,
            "--headless-ticks" => {
                let Some(n) = args.next() else {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "--headless-ticks requires a number",
                    ));
                };
                cli.ticks = n.parse().map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("--headless-ticks expects a non-negative integer, got {n:?}"),
                    )
                })?;
            }
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("unknown argument: {other} (try --help)"),
                ));
            }
        }
    }
    Ok(cli)
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

#[derive(Debug, Clone, Copy)]
struct Stats {
    n: usize,
    avg: f64,
    p50: f64,
    p95: f64,
    max: f64,
}

impl Stats {
    fn from_samples(xs: &mut [f64]) -> Self {
        if xs.is_empty() {
            return Self {
                n: 0,
                avg: 0.0,
                p50: 0.0,
                p95: 0.0,
                max: 0.0,
            };
        }
        xs.sort_by(|a, b| a.total_cmp(b));
        let n = xs.len();
        let avg = xs.iter().sum::<f64>() / n as f64;
        Self {
            n,
            avg,
            p50: percentile_sorted(xs, 0.50),
            p95: percentile_sorted(xs, 0.95),
            max: xs[n - 1],
        }
    }
}

fn percentile_sorted(xs: &[f64], p: f64) -> f64 {
    let rank = ((xs.len() - 1) as f64 * p).round() as usize;
    xs[rank.min(xs.len() - 1)]
}

/// Keeps every tick's timings for percentile reporting, plus running totals.
#[derive(Debug, Default)]
struct Collector {
    summary: TimingSummary,
    sample: Vec<f64>,
    simulate: Vec<f64>,
    render: Vec<f64>,
    total: Vec<f64>,
}

impl Profiler for Collector {
    fn on_tick(&mut self, tick: u64, t: TickTimings) {
        self.summary.on_tick(tick, t);
        self.sample.push(ms(t.sample));
        self.simulate.push(ms(t.simulate));
        self.render.push(ms(t.render));
        self.total.push(ms(t.total));
    }
}

/// Fraction of total tick time spent drawing.
fn render_share(summary: &TimingSummary) -> f64 {
    let total = summary.total.as_secs_f64();
    if total == 0.0 {
        return 0.0;
    }
    summary.render.as_secs_f64() / total
}

fn print_stats(label: &str, s: Stats) {
    println!(
        "{label:<9} n={n:<6} avg={avg:>7.3}ms p50={p50:>7.3}ms p95={p95:>7.3}ms max={max:>7.3}ms",
        n = s.n,
        avg = s.avg,
        p50 = s.p50,
        p95 = s.p95,
        max = s.max
    );
}

fn run(cli: HeadlessCli) -> Result<(), GameError> {
    let config = ConfigStore::from_env().load()?;
    let size = SurfaceSize::new(config.playfield_width, config.playfield_height);

    let camera = SyntheticCamera::new(160, 120);
    let hand = ScriptedHand::sine(HAND_PERIOD_TICKS, HAND_AMPLITUDE);
    let mut game = GameLoop::new(config, camera, hand);
    let mut surface = RgbaBufferSurface::new(size);
    let mut timings = Collector::default();

    let mut outcome = TickOutcome::Simulated;
    let mut ticks = 0u64;
    while outcome != TickOutcome::Finished {
        let quit = ticks >= cli.ticks;
        outcome = draw_frame(&mut surface, |gfx| game.step_profiled(quit, gfx, &mut timings))?;
        if let Err(never) = surface.present() {
            match never {}
        }
        ticks += 1;
    }

    let state = game.state();
    println!("wristflap headless");
    println!(
        "ticks={} score={} stage={} spawned={} evicted={} renders={}",
        state.elapsed_ticks,
        state.score(),
        state.stage(),
        state.track.spawned_total(),
        state.track.evicted_total(),
        game.renders(),
    );
    println!();
    println!("(ms) lower is better");
    print_stats("sample", Stats::from_samples(&mut timings.sample));
    print_stats("simulate", Stats::from_samples(&mut timings.simulate));
    print_stats("render", Stats::from_samples(&mut timings.render));
    print_stats("tick", Stats::from_samples(&mut timings.total));
    let summary = timings.summary;
    println!(
        "profiled={} mean_tick={:.3}ms worst_tick={:.3}ms render_share={:.1}%",
        summary.ticks,
        ms(summary.mean_total()),
        ms(summary.worst_total),
        render_share(&summary) * 100.0,
    );
    Ok(())
}

fn main() -> ExitCode {
    let _log_guard = wristflap::logging::init();

    let cli = match parse_cli(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };
    if cli.help {
        println!("{HELP}");
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "headless run failed");
            ExitCode::FAILURE
        }
    }
}
