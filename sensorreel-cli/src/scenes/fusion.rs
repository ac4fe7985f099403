//! GPS spoofing against multi-sensor fusion: the fused position drifts off the road.

use sensorreel::{
    ANNOTATION_PRIORITY, Actor, Callback, Color, ConstantVelocity, DriftAttack, FadeInOut, Feed,
    Legend, Period, PidController, Point, PolyLine, ReelResult, Road, Sampler, Scene,
    SceneConfig, Sprite, Text, TextEntry, TextList, Trajectory, Vehicle,
};

use super::assets;

const GPS_AT: f64 = 3.0;
const LIDAR_AT: f64 = GPS_AT + 4.0;
const IMU_AT: f64 = LIDAR_AT + 4.0;
const MSF_AT: f64 = IMU_AT + 4.0;
const ATTACK_AT: f64 = MSF_AT + 4.0;
const ATTACK_EFFECT_AT: f64 = ATTACK_AT + 1.0;
const CRASH_AT: f64 = ATTACK_AT + 4.0;

pub const DURATION: f64 = CRASH_AT;

const CITATION: &str = "[1] J. Shen, J. Y. Won, Z. Chen, and Q. A. Chen, \"Drift with Devil: \
Security of Multi-Sensor Fusion based\n     Localization in High-Level Autonomous Driving under \
GPS Spoofing,\" in USENIX Security, 2020.";

fn hex(s: &str) -> ReelResult<Color> {
    Color::parse(s)
}

fn sensor(truth: &Feed, noise: f64, period: f64, color: Color, seed: u64) -> Trajectory {
    Trajectory::new(truth.clone())
        .gaussian(Point::new(noise, noise))
        .with_period(period)
        .with_color(color)
        .with_seed(seed)
}

pub fn build(cfg: SceneConfig) -> ReelResult<Scene> {
    let mut scene = Scene::new(cfg)?;
    let car = assets::car()?;
    let green = hex("#008000")?;

    scene.add_actor(Road::new());
    for (x, speed) in [(25.0, 10.0), (164.0, 8.0)] {
        scene.add_actor(
            Vehicle::new(Point::new(x, 4.0), ConstantVelocity(Point::new(speed, 0.0)))
                .with_texture(car.clone()),
        );
    }

    let mut ego = Vehicle::new(
        Point::ZERO,
        PidController::new(Point::new(15.0, 0.0), 0.0).with_gains(1.0, 0.2, 0.0),
    )
    .with_texture(car)
    .rotating_texture();
    let truth = ego.feed();

    let gps = sensor(&truth, 0.4, 0.15, hex("#000080")?, 1)
        .with_callback(FadeInOut::new(GPS_AT, GPS_AT + 2.5));
    let lidar = sensor(&truth, 0.4, 0.25, hex("#EE82EE")?, 2)
        .with_callback(FadeInOut::new(LIDAR_AT, LIDAR_AT + 2.5));
    let imu = sensor(&truth, 0.4, 0.1, hex("#5F9EA0")?, 3)
        .with_callback(FadeInOut::new(IMU_AT, IMU_AT + 2.5));
    let msf = sensor(&truth, 0.1, 0.1, green, 4)
        .with_callback(FadeInOut::starting(MSF_AT))
        .with_callback(Callback::lifecycle_gate(Period::new(0.0, ATTACK_EFFECT_AT)));
    let attacked = Trajectory::new(truth)
        .with_sampler(Sampler::Drift(DriftAttack::new(ATTACK_EFFECT_AT, 0.0)))
        .with_period(0.1)
        .with_color(Color::RED)
        .with_callback(FadeInOut::starting(ATTACK_EFFECT_AT))
        .with_callback(Callback::lifecycle_gate(Period::starting(ATTACK_EFFECT_AT)));

    // the ego follows the fused position, which the attacker takes over
    if let Some(pid) = ego.controller_as::<PidController>() {
        pid.set_measurement(attacked.output());
    }
    let ego = scene.add_actor(ego);
    scene.set_ego(ego)?;

    let legends = [
        Legend::new("GPS", Point::new(2.0, 13.0), gps.marker)
            .with_callback(FadeInOut::new(GPS_AT, ATTACK_AT)),
        Legend::new("GPS", Point::new(2.0, 13.0), gps.marker)
            .with_text_color(Color::RED)
            .with_callback(FadeInOut::starting(ATTACK_AT)),
        Legend::new("LiDAR", Point::new(2.0, 12.0), lidar.marker)
            .with_callback(FadeInOut::starting(LIDAR_AT)),
        Legend::new("IMU", Point::new(2.0, 11.0), imu.marker)
            .with_callback(FadeInOut::starting(IMU_AT)),
        Legend::new("MSF", Point::new(9.0, 12.0), msf.marker)
            .with_callback(FadeInOut::new(MSF_AT, ATTACK_EFFECT_AT)),
        Legend::new("MSF", Point::new(9.0, 12.0), msf.marker)
            .with_text_color(Color::RED)
            .with_marker_color(Color::RED)
            .with_callback(FadeInOut::starting(ATTACK_EFFECT_AT)),
    ];
    for traj in [gps, lidar, imu, msf, attacked] {
        scene.add_actor(traj);
    }
    for legend in legends {
        scene.add_actor(legend);
    }

    let zigzag_down = [Point::new(1.0, 0.0), Point::new(0.0, -1.0), Point::new(1.0, 0.0)];
    let zigzag_up = [Point::new(1.0, 0.0), Point::new(0.0, 1.0), Point::new(1.0, 0.0)];
    scene.add_actor(
        PolyLine::new(Point::new(6.0, 13.0), zigzag_down, 1.0)
            .with_callback(FadeInOut::new(MSF_AT, ATTACK_AT)),
    );
    scene.add_actor(
        PolyLine::new(Point::new(6.0, 13.0), zigzag_down, 1.0)
            .with_color(Color::RED)
            .with_priority(ANNOTATION_PRIORITY + 1)
            .with_callback(FadeInOut::starting(ATTACK_AT + 0.5)),
    );
    scene.add_actor(
        PolyLine::new(Point::new(6.0, 12.0), [Point::new(2.0, 0.0)], 1.0)
            .with_callback(FadeInOut::starting(MSF_AT)),
    );
    scene.add_actor(
        PolyLine::new(Point::new(6.0, 11.0), zigzag_up, 1.0)
            .with_callback(FadeInOut::starting(MSF_AT)),
    );

    scene.add_actor(
        Sprite::new(assets::attacker()?, Point::new(2.5, 9.0), Point::new(3.0, 3.0))
            .with_callback(Callback::grow(Period::new(ATTACK_AT - 0.2, ATTACK_AT))),
    );
    scene.add_actor(
        Sprite::new(assets::signal()?, Point::new(4.8, 7.2), Point::new(4.0, 4.0))
            .with_rotation(230.0)
            .with_callback(Callback::grow(Period::new(ATTACK_AT, ATTACK_AT + 0.2))),
    );
    scene.add_actor(
        Sprite::new(assets::crash()?, Point::new(17.0, 6.5), Point::new(4.0, 4.0))
            .with_callback(Callback::grow(Period::new(CRASH_AT - 0.2, CRASH_AT))),
    );
    scene.add_actor(
        Text::new("GPS spoofing", Point::new(4.5, 9.5))
            .with_color(Color::RED)
            .with_callback(FadeInOut::starting(ATTACK_AT)),
    );

    let top = scene.camera().size.y;
    let attack_title = "FusionRipper"
        .chars()
        .map(String::from)
        .chain(["[1]".to_owned()])
        .chain(" attack".chars().map(String::from));
    scene.add_actor(
        TextList::new(Point::new(1.0, top - 0.5))
            .size(48.0)
            .entry(TextEntry::chars("Multi-Sensor Fusion (MSF)", 0.0, ATTACK_AT - 1.0))
            .entry(TextEntry::tokens(attack_title, ATTACK_AT - 1.0, f64::INFINITY))
            .build(),
    );
    scene.add_actor(
        TextList::new(Point::new(1.0, top - 1.5))
            .typing(false)
            .size(22.0)
            .entry(TextEntry::chars(
                "MSF fuses inputs from different sensors to get the vehicle localization.",
                0.5,
                ATTACK_AT - 1.0,
            ))
            .entry(TextEntry::chars(
                "FusionRipper attack can attack MSF results by spoofing only GPS signal.",
                ATTACK_AT,
                f64::INFINITY,
            ))
            .build(),
    );
    scene.add_actor(
        Text::new(CITATION, Point::new(0.5, 0.1))
            .with_size(22.0)
            .with_callback(FadeInOut::starting(ATTACK_AT - 1.0)),
    );

    Ok(scene)
}
