//! rdw-steer headless demo
//!
//! Drives a steering session with a synthetic user who walks "straight" in
//! the virtual world inside a small physical room, and reports how often the
//! correction fired and how often the walker ended up outside the room.

use std::path::PathBuf;

use clap::Parser;
use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use rdw_steer::consts::FRAME_DT;
use rdw_steer::host::{BoundaryProvider, PoseSource, StaticBoundary};
use rdw_steer::steer::{Pose, RigTransform, SteeringSession, TrackedUser};
use rdw_steer::{ConfigError, IndicatorMode, SteeringConfig};

#[derive(Parser)]
#[command(name = "rdw-steer")]
#[command(about = "Headless redirected walking simulation")]
struct Args {
    /// Steering config (JSON); defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value_t = 5400)]
    frames: u32,

    #[arg(short, long, default_value_t = 7)]
    seed: u64,

    #[arg(long, default_value_t = 2.0, help = "Room half width (m)")]
    half_width: f32,

    #[arg(long, default_value_t = 2.0, help = "Room half depth (m)")]
    half_depth: f32,

    #[arg(long, default_value_t = 1.1, help = "Walking speed (m/s)")]
    speed: f32,

    #[arg(long, default_value_t = 1, help = "Other users circling the room")]
    users: usize,

    #[arg(long, default_value_t = 6.0, help = "Seconds between virtual turns")]
    turn_every: f32,

    #[arg(long, help = "Arrow overlay source: direction | steering")]
    indicator: Option<String>,
}

const HEAD_HEIGHT: f32 = 1.7;
const SWAY: f32 = 0.002;
const YAW_JITTER_DEG: f32 = 1.5;
const USER_DROPOUT: f64 = 0.02;

/// Head tracked inside a moving rig
struct SyntheticHead {
    local_position: Vec3,
    local_yaw_deg: f32,
    jitter_deg: f32,
    rig: RigTransform,
}

impl SyntheticHead {
    fn world_position(&self) -> Vec3 {
        self.rig.transform_point(self.local_position)
    }
}

impl PoseSource for SyntheticHead {
    fn head_pose(&self) -> Pose {
        let local = Quat::from_rotation_y((self.local_yaw_deg + self.jitter_deg).to_radians());
        Pose::new(self.world_position(), self.rig.rotation * local)
    }

    fn rig(&self) -> RigTransform {
        self.rig
    }
}

#[derive(Debug, Default)]
struct Summary {
    frames: u32,
    applied: u32,
    emergency: u32,
    outside: u32,
    injected_deg: f32,
    peak_rate: f32,
}

fn main() -> Result<(), ConfigError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SteeringConfig::from_json_file(path)?,
        None => SteeringConfig::default(),
    };
    if let Some(name) = &args.indicator {
        match IndicatorMode::from_str(name) {
            Some(mode) => config.indicator = mode,
            None => log::warn!("Unknown indicator mode '{name}', keeping {}", config.indicator.as_str()),
        }
    }
    log::info!(
        "rdw-steer demo: {} frames, room {:.1} x {:.1} m, seed {}, indicator {}",
        args.frames,
        args.half_width * 2.0,
        args.half_depth * 2.0,
        args.seed,
        config.indicator.as_str()
    );

    let summary = run(&args, config);

    println!("frames           {}", summary.frames);
    println!("applied          {}", summary.applied);
    println!("too-close frames {}", summary.emergency);
    println!("outside room     {}", summary.outside);
    println!("injected         {:.1} deg", summary.injected_deg);
    println!("peak rate        {:.2} deg/s", summary.peak_rate);
    Ok(())
}

fn run(args: &Args, config: SteeringConfig) -> Summary {
    let mut rng = Pcg32::seed_from_u64(args.seed);
    let mut session = SteeringSession::new(config);

    let mut head = SyntheticHead {
        local_position: Vec3::new(0.0, HEAD_HEIGHT, 0.0),
        local_yaw_deg: 0.0,
        jitter_deg: 0.0,
        rig: RigTransform::default(),
    };
    let mut boundary = StaticBoundary::rectangle((args.half_width, args.half_depth), 0.25, &head.rig);
    let circle_radius = args.half_width.min(args.half_depth) * 0.6;

    let mut virtual_yaw: f32 = 0.0;
    let mut until_turn = args.turn_every;
    let mut summary = Summary::default();

    for frame in 0..args.frames {
        let t = frame as f32 * FRAME_DT;

        until_turn -= FRAME_DT;
        if until_turn <= 0.0 {
            virtual_yaw += rng.random_range(-120.0_f32..120.0);
            until_turn = args.turn_every;
            log::debug!("virtual turn to {virtual_yaw:.0} deg at {t:.1}s");
        }

        // Hold the virtual heading: physical yaw absorbs the rig's rotation
        let world_forward = Quat::from_rotation_y(virtual_yaw.to_radians()) * Vec3::Z;
        let local_forward = head.rig.rotation.inverse() * world_forward;
        head.local_yaw_deg = local_forward.x.atan2(local_forward.z).to_degrees();
        head.jitter_deg = rng.random_range(-YAW_JITTER_DEG..YAW_JITTER_DEG);

        let step = Vec3::new(local_forward.x, 0.0, local_forward.z).normalize_or_zero() * args.speed * FRAME_DT;
        let sway = Vec3::new(rng.random_range(-SWAY..SWAY), 0.0, rng.random_range(-SWAY..SWAY));
        head.local_position += step + sway;

        boundary.follow_rig(&head.rig);
        let users: Vec<TrackedUser> = (0..args.users)
            .map(|i| {
                if rng.random_bool(USER_DROPOUT) {
                    return None;
                }
                let phase = t * 0.4 + i as f32 * std::f32::consts::TAU / args.users as f32;
                let local = Vec3::new(phase.cos() * circle_radius, HEAD_HEIGHT, phase.sin() * circle_radius);
                Some(head.rig.transform_point(local))
            })
            .collect();

        let result = session.tick_from(FRAME_DT, &head, &boundary, &users, &false);

        if result.applied {
            let pivot = head.world_position();
            head.rig.rotate_around(pivot, Vec3::NEG_Y, result.rotation);
            summary.applied += 1;
            summary.injected_deg += result.rotation.abs();
            summary.peak_rate = summary.peak_rate.max(result.diagnostics.rotation_rate.abs());
        }
        if result.emergency {
            summary.emergency += 1;
        }

        let p = head.local_position;
        if p.x.abs() > args.half_width || p.z.abs() > args.half_depth {
            summary.outside += 1;
        }

        if frame % 900 == 0 {
            log::info!(
                "t={t:>5.1}s |total| {:.3} boundary {:.3} player {:.3} circle {:.3} drift {:+.2} markers {}",
                result.diagnostics.total,
                result.diagnostics.boundary,
                result.diagnostics.player,
                result.diagnostics.circle,
                result.diagnostics.drift_multiplier,
                boundary.markers().len()
            );
        }
        summary.frames += 1;
    }

    summary
}
