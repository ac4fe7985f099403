//! Lane detection as a cross check on the fused position.

use sensorreel::{
    Actor, Callback, Color, ColorRamp, ColorTarget, FadeInOut, Legend, MarkerShape, MarkerStyle,
    Mux, Period, PidController, Point, PolyLine, ReelResult, Road, Scene, SceneConfig, Text,
    TextEntry, TextList, Trajectory, Vehicle, lane_detection,
};

use super::assets;

const TITLE_AT: f64 = 1.0;
const EXPLANATION_AT: f64 = TITLE_AT + 1.0;
const LD_AT: f64 = EXPLANATION_AT + 1.0;
const TRUTH_AT: f64 = LD_AT + 1.0;
const MSF_AT: f64 = TRUTH_AT + 3.0;
const DETECT_AT: f64 = MSF_AT + 1.0;
const SLOW_DOWN_AT: f64 = DETECT_AT + 2.0;
const FUSION_EXPLANATION_AT: f64 = SLOW_DOWN_AT + 3.0;
const FUSION_AT: f64 = FUSION_EXPLANATION_AT + 1.0;
const SUSPICIOUS_EXPLANATION_AT: f64 = FUSION_AT + 5.0;
const LD_SUSPICIOUS_AT: f64 = SUSPICIOUS_EXPLANATION_AT + 2.0;
const MSF_SUSPICIOUS_AT: f64 = SUSPICIOUS_EXPLANATION_AT + 3.0;
const HIGHLIGHT: f64 = 2.0;
const MUX_AT: f64 = MSF_SUSPICIOUS_AT + HIGHLIGHT;
const LOCALIZATION_AT: f64 = MUX_AT + 2.0;
const ATTACK_AT: f64 = LOCALIZATION_AT + 2.0;

pub const DURATION: f64 = ATTACK_AT + 4.0;

fn highlight(at: f64) -> Callback {
    let ramp = ColorRamp::new(Period::lasting(at, HIGHLIGHT), Color::BLACK, Color::RED);
    Callback::recolor(ramp.there_and_back(), ColorTarget::Text)
}

fn arrow(start: Point, deltas: &[(f64, f64)], color: Color, at: f64) -> PolyLine {
    PolyLine::new(start, deltas.iter().map(|&(x, y)| Point::new(x, y)), 1.0)
        .with_color(color)
        .with_callback(FadeInOut::starting(at))
}

fn label(content: &str, at: Point, from: f64) -> Text {
    Text::new(content, at)
        .with_size(22.0)
        .boxed()
        .with_callback(FadeInOut::starting(from))
}

pub fn build(cfg: SceneConfig) -> ReelResult<Scene> {
    let mut scene = Scene::new(cfg)?;
    let detection = Color::parse("#87CEFA")?;
    let fusion = Color::parse("#DDA0DD")?;
    let green = Color::parse("#008000")?;

    let road = Road::new();
    let lines = road.lines();
    scene.add_actor(road);

    let mut ego = Vehicle::new(Point::ZERO, PidController::new(Point::new(15.0, 0.0), 0.0))
        .with_texture(assets::car()?)
        .rotating_texture();
    let truth = ego.feed();

    let detections = lane_detection(&truth, &lines, 10.0, Point::new(0.0, 0.1), 0.1, 7)
        .with_callback(FadeInOut::starting(LD_AT));
    let ld_marker = MarkerStyle {
        line_width: 3.0,
        ..MarkerStyle::default()
    };

    let ground_truth = Trajectory::new(truth.clone())
        .with_marker_shape(MarkerShape::Circle)
        .with_animation_time(-1.0)
        .with_callback(FadeInOut::starting(TRUTH_AT));
    let msf = Trajectory::new(truth)
        .gaussian(Point::new(0.2, 0.2))
        .with_period(0.1)
        .with_seed(5)
        .with_color(green)
        .with_callback(FadeInOut::starting(MSF_AT));

    if let Some(pid) = ego.controller_as::<PidController>() {
        pid.set_measurement(msf.output());
    }
    let ego = scene.add_actor(ego);
    scene.set_ego(ego)?;

    let legends = [
        Legend::new("LD", Point::new(1.0, 14.0), ld_marker)
            .with_callback(FadeInOut::starting(LD_AT))
            .with_callback(highlight(LD_SUSPICIOUS_AT)),
        Legend::new("Ground truth", Point::new(1.0, 12.5), ground_truth.marker)
            .with_callback(FadeInOut::new(TRUTH_AT, MSF_AT)),
        Legend::new("MSF", Point::new(1.0, 12.5), msf.marker)
            .with_callback(FadeInOut::starting(MSF_AT))
            .with_callback(highlight(MSF_SUSPICIOUS_AT)),
    ];
    scene.add_actor(detections);
    scene.add_actor(ground_truth);
    scene.add_actor(msf);
    for legend in legends {
        scene.add_actor(legend);
    }

    scene.add_actor(label("Cross checking", Point::new(8.8, 15.0), DETECT_AT + 1.0));
    scene.add_actor(label("Slow down?", Point::new(16.3, 15.0), SLOW_DOWN_AT + 1.0));
    scene.add_actor(label("Fusion", Point::new(8.8, 10.0), FUSION_AT + 1.0));
    scene.add_actor(label("Localization", Point::new(16.3, 11.225), LOCALIZATION_AT));

    let arrows: [(Point, &[(f64, f64)], Color, f64); 8] = [
        (Point::new(4.0, 14.05), &[(1.5, 0.0), (0.0, 1.15), (3.0, 0.0)], detection, DETECT_AT),
        (Point::new(4.0, 12.55), &[(3.5, 0.0), (0.0, 2.25), (1.0, 0.0)], detection, DETECT_AT),
        (Point::new(13.5, 15.0), &[(2.5, 0.0)], detection, SLOW_DOWN_AT),
        (Point::new(4.0, 14.0), &[(2.5, 0.0), (0.0, -3.8), (2.0, 0.0)], fusion, FUSION_AT),
        (Point::new(4.0, 12.5), &[(1.5, 0.0), (0.0, -2.7), (3.0, 0.0)], fusion, FUSION_AT),
        (Point::new(4.0, 12.45), &[(10.0, 0.0)], Color::BLACK, MUX_AT),
        (Point::new(11.0, 10.0), &[(3.0, 0.0)], fusion, MUX_AT),
        (Point::new(13.5, 15.0), &[(1.0, 0.0), (0.0, -2.2)], detection, MUX_AT + 1.0),
    ];
    for (start, deltas, color, at) in arrows {
        scene.add_actor(arrow(start, deltas, color, at));
    }

    scene.add_actor(Mux::new(Point::new(14.0, 11.225)).with_callback(FadeInOut::starting(MUX_AT)));

    // under attack the localization switches from MSF to the fused source
    let switch = ColorRamp::new(Period::lasting(ATTACK_AT, 2.0), Color::BLACK, fusion);
    scene.add_actor(
        arrow(Point::new(15.0, 11.225), &[(1.0, 0.0)], Color::BLACK, LOCALIZATION_AT)
            .with_callback(Callback::recolor(switch, ColorTarget::Line)),
    );

    let top = scene.camera().size.y;
    let defense_title = ["L", "D", "³"]
        .into_iter()
        .map(String::from)
        .chain(": A LD based defense".chars().map(String::from));
    scene.add_actor(
        TextList::new(Point::new(1.0, top - 0.2))
            .size(48.0)
            .entry(TextEntry::chars("Lane detection (LD)", TITLE_AT, MSF_AT))
            .entry(TextEntry::tokens(defense_title, MSF_AT, f64::INFINITY))
            .build(),
    );

    let explanations = [
        (
            "LD can be used for local localization,\n\
             and the vehicle knows its position within the lane.",
            EXPLANATION_AT,
            MSF_AT,
        ),
        (
            "We can use LD to cross check with MSF to detect attacks,\n\
             and slow down to avoid accidents.",
            MSF_AT,
            FUSION_EXPLANATION_AT,
        ),
        (
            "For localization, we can naively fully trust LD,\n\
             but that is vulnerable to LD attacks.\n\
             Instead, we fuse MSF and LD based on suspiciousness.",
            FUSION_EXPLANATION_AT,
            SUSPICIOUS_EXPLANATION_AT,
        ),
        (
            "The fusion algorithm will assign high suspiciousness to\n\
             the source that can lead to severe consequences.",
            SUSPICIOUS_EXPLANATION_AT,
            MUX_AT,
        ),
        (
            "Without attack, results from MSF is used as localization.",
            MUX_AT,
            ATTACK_AT,
        ),
        (
            "With attack, fusion results are used for localization\n\
             to slow down within the lane.",
            ATTACK_AT,
            f64::INFINITY,
        ),
    ];
    let mut list = TextList::new(Point::new(1.0, top - 2.0)).typing(false).size(24.0);
    for (text, start, end) in explanations {
        list = list.entry(TextEntry::chars(text, start, end));
    }
    scene.add_actor(list.build());

    Ok(scene)
}
