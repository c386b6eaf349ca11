use spacetime::benchmark::benchmark::{circular_binary, relative_energy_drift};
use spacetime::{Body, EngineError, Euler, Integrator, NewtonianGravity, Universe, Vector, Verlet};
use spacetime::{EnergyHistory, Scenario, ScenarioConfig};

/// Build a simple 2-body universe separated along the x-axis
pub fn two_body_universe(dist: f64, m1: f64, m2: f64) -> Universe {
    let mut universe = Universe::new(NewtonianGravity::new(0.1), 64);
    universe.insert(Body::new("a", m1, 0.01, Vector::new(-dist / 2.0, 0.0, 0.0), Vector::zeros()));
    universe.insert(Body::new("b", m2, 0.01, Vector::new(dist / 2.0, 0.0, 0.0), Vector::zeros()));
    universe
}

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

// ==================================================================================
// Vector tests
// ==================================================================================

#[test]
fn vector_normalize_zero_is_domain_error() {
    let mut v = Vector::zeros();
    assert!(matches!(v.normalize(), Err(EngineError::Domain(_))));
    assert_eq!(v, Vector::zeros(), "failed normalize must not touch the receiver");
}

#[test]
fn vector_normalize_gives_unit_length() {
    let mut v = Vector::new(3.0, 4.0, 0.0);
    v.normalize().unwrap();
    assert!(close(v.magnitude(), 1.0, 1e-15));
    assert!(close(v.x(), 0.6, 1e-15));
    assert!(close(v.y(), 0.8, 1e-15));
}

#[test]
fn vector_translate_and_negate_mutate_receiver() {
    let mut v = Vector::new(1.0, 2.0, 3.0);
    v.translate(&Vector::new(1.0, 1.0, 1.0)).negate();
    assert_eq!(v, Vector::new(-2.0, -3.0, -4.0));
    assert_eq!(v.magnitude_squared(), 4.0 + 9.0 + 16.0);
}

#[test]
fn vector_distance_is_symmetric() {
    let a = Vector::new(1.0, -2.0, 0.5);
    let b = Vector::new(-3.0, 1.0, 2.5);
    assert_eq!(a.distance_to(&b), b.distance_to(&a));
    assert!(a.distance_to(&b) > 0.0);
    assert_eq!(a.distance_to(&a), 0.0);
}

#[test]
fn vector_from_definition_components() {
    let planar = Vector::try_from(&[1.0, 2.0][..]).unwrap();
    assert_eq!(planar, Vector::new(1.0, 2.0, 0.0));

    assert!(matches!(Vector::try_from(&[1.0][..]), Err(EngineError::Configuration(_))));
    assert!(matches!(
        Vector::try_from(&[1.0, f64::NAN, 0.0][..]),
        Err(EngineError::Configuration(_))
    ));
}

// ==================================================================================
// Body tests
// ==================================================================================

#[test]
fn body_equality_is_by_id() {
    let a = Body::new("earth", 1.0, 1.0, Vector::zeros(), Vector::zeros());
    let b = Body::new("earth", 2.0, 5.0, Vector::planar(1.0, 1.0), Vector::zeros());
    let c = Body::new("mars", 1.0, 1.0, Vector::zeros(), Vector::zeros());
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn body_direction_to_self_or_coincident_is_none() {
    let a = Body::new("a", 1.0, 1.0, Vector::zeros(), Vector::zeros());
    let same_id = Body::new("a", 1.0, 1.0, Vector::planar(5.0, 0.0), Vector::zeros());
    let coincident = Body::new("b", 1.0, 1.0, Vector::zeros(), Vector::zeros());
    let other = Body::new("c", 1.0, 1.0, Vector::planar(0.0, 2.0), Vector::zeros());

    assert!(a.direction_to(&same_id).is_none());
    assert!(a.direction_to(&coincident).is_none());
    assert_eq!(a.direction_to(&other), Some(Vector::planar(0.0, 1.0)));
    assert_eq!(a.distance_to(&other), 2.0);
}

#[test]
fn static_body_ignores_velocity_and_motion() {
    let start = Vector::planar(3.0, 4.0);
    let mut sun = Body::new("sun", 10.0, 1.0, start, Vector::zeros()).with_static(true);

    sun.apply_velocity_delta(Vector::planar(1.0, 0.0));
    sun.advance_position();

    assert_eq!(sun.velocity, Vector::zeros());
    assert_eq!(sun.position, start);
    assert!(sun.last_position.is_none());
    assert_eq!(sun.kinetic_energy(), 0.0);
}

#[test]
fn dynamic_body_moves_by_velocity() {
    let mut probe = Body::new("probe", 2.0, 1.0, Vector::planar(1.0, 1.0), Vector::planar(0.5, 0.0));
    probe.apply_velocity_delta(Vector::planar(0.5, 1.0));
    probe.advance_position();

    assert_eq!(probe.velocity, Vector::planar(1.0, 1.0));
    assert_eq!(probe.position, Vector::planar(2.0, 2.0));
    assert_eq!(probe.last_position, Some(Vector::planar(1.0, 1.0)));
    assert_eq!(probe.kinetic_energy(), 0.5 * 2.0 * 2.0);
}

// ==================================================================================
// Gravity / universe tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let mut universe = two_body_universe(1.0, 2.0, 3.0);
    universe.step_forces();

    let [a, b] = universe.bodies() else { panic!("expected two bodies") };
    let net = a.acceleration * a.mass + b.acceleration * b.mass;

    assert!(net.magnitude() < 1e-12, "Net momentum change not zero: {:?}", net);
}

#[test]
fn gravity_pairs_cancel_in_larger_systems() {
    let mut universe = Universe::new(NewtonianGravity::new(1.0), 8);
    universe.insert(Body::new("a", 1.0, 0.1, Vector::new(0.0, 0.0, 0.0), Vector::zeros()));
    universe.insert(Body::new("b", 2.0, 0.1, Vector::new(1.0, 0.5, 0.0), Vector::zeros()));
    universe.insert(Body::new("c", 3.5, 0.1, Vector::new(-0.7, 2.0, 1.0), Vector::zeros()));
    universe.step_forces();

    let mut net = Vector::zeros();
    for body in universe.bodies() {
        net += body.acceleration * body.mass;
    }
    assert!(net.magnitude() < 1e-12, "Net momentum change not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let mut universe = two_body_universe(2.0, 1.0, 1.0);
    universe.step_forces();

    let a = universe.get("a").unwrap();
    let b = universe.get("b").unwrap();
    let dx = b.position - a.position;

    assert!(a.acceleration.0.dot(&dx.0) > 0.0, "Acceleration is not toward second body");
    assert!(b.acceleration.0.dot(&dx.0) < 0.0, "Reaction is not toward first body");
}

#[test]
fn gravity_inverse_square_law() {
    let mut near = two_body_universe(1.0, 1.0, 1.0);
    let mut far = two_body_universe(2.0, 1.0, 1.0);
    near.step_forces();
    far.step_forces();

    let ratio = near.bodies()[0].acceleration.magnitude() / far.bodies()[0].acceleration.magnitude();
    assert!(close(ratio, 4.0, 1e-12), "Expected 4x, got {}", ratio);
}

#[test]
fn potential_is_split_between_pair() {
    let mut universe = two_body_universe(2.0, 2.0, 3.0);
    universe.step_forces();

    let expected = -0.1 * 2.0 * 3.0 / 2.0;
    let [a, b] = universe.bodies() else { panic!("expected two bodies") };
    assert!(close(a.potential_energy, expected / 2.0, 1e-15));
    assert!(close(b.potential_energy, expected / 2.0, 1e-15));

    universe.refresh_energy_values();
    assert!(close(universe.total_energy()[1], expected, 1e-15));
    assert_eq!(universe.total_energy()[0], 0.0);
}

#[test]
fn coincident_bodies_are_skipped() {
    let mut universe = Universe::new(NewtonianGravity::new(1.0), 8);
    universe.insert(Body::new("a", 1.0, 0.1, Vector::planar(1.0, 1.0), Vector::zeros()));
    universe.insert(Body::new("b", 1.0, 0.1, Vector::planar(1.0, 1.0), Vector::zeros()));
    universe.step_forces();

    for body in universe.bodies() {
        assert_eq!(body.acceleration, Vector::zeros());
        assert_eq!(body.potential_energy, 0.0);
    }

    // A third body still interacts with both
    universe.insert(Body::new("c", 1.0, 0.1, Vector::planar(3.0, 1.0), Vector::zeros()));
    universe.step_forces();
    let a = universe.get("a").unwrap();
    let c = universe.get("c").unwrap();
    assert!(a.acceleration.is_finite() && c.acceleration.is_finite());
    assert!(close(a.acceleration.x(), 0.25, 1e-15));
    assert!(close(c.acceleration.x(), -0.5, 1e-15));
}

#[test]
fn duplicate_id_is_rejected() {
    let mut universe = Universe::new(NewtonianGravity::new(1.0), 8);
    assert!(universe.insert(Body::new("moon", 7.0, 1.0, Vector::planar(1.0, 0.0), Vector::zeros())));
    assert!(!universe.insert(Body::new("moon", 99.0, 2.0, Vector::planar(5.0, 5.0), Vector::zeros())));

    assert_eq!(universe.len(), 1);
    let moon = universe.get("moon").unwrap();
    assert_eq!(moon.mass, 7.0);
    assert_eq!(moon.radius, 1.0);
    assert_eq!(moon.position, Vector::planar(1.0, 0.0));
}

#[test]
fn massless_or_broken_bodies_are_rejected() {
    let mut universe = Universe::new(NewtonianGravity::new(1.0), 8);
    assert!(universe.insert(Body::new("rock", 1.0, 0.1, Vector::zeros(), Vector::zeros())));

    assert!(!universe.insert(Body::new("dust", 0.0, 0.1, Vector::planar(1.0, 0.0), Vector::zeros())));
    assert!(!universe.insert(Body::new("ghost", -2.0, 0.1, Vector::planar(2.0, 0.0), Vector::zeros())));
    assert!(!universe.insert(Body::new("void", f64::NAN, 0.1, Vector::planar(3.0, 0.0), Vector::zeros())));
    assert!(!universe.insert(Body::new("lost", 1.0, 0.1, Vector::planar(f64::INFINITY, 0.0), Vector::zeros())));

    assert_eq!(universe.len(), 1);
    assert!(universe.get("dust").is_none());

    // the survivor integrates cleanly
    Verlet::new(0.1).advance(&mut universe, 1.0);
    let rock = universe.get("rock").unwrap();
    assert!(rock.position.is_finite() && rock.acceleration.is_finite());
    assert!(universe.center_of_mass().unwrap().is_finite());
}

#[test]
fn center_of_mass_of_equal_masses_is_midpoint() {
    let mut universe = Universe::new(NewtonianGravity::new(1.0), 8);
    universe.insert(Body::new("a", 4.0, 1.0, Vector::new(-1.0, 2.0, 0.0), Vector::zeros()));
    universe.insert(Body::new("b", 4.0, 1.0, Vector::new(3.0, 4.0, 2.0), Vector::zeros()));

    let com = universe.center_of_mass().unwrap();
    assert!(close(com.x(), 1.0, 1e-12));
    assert!(close(com.y(), 3.0, 1e-12));
    assert!(close(com.z(), 1.0, 1e-12));
}

#[test]
fn center_of_mass_of_empty_universe_fails() {
    let universe = Universe::new(NewtonianGravity::new(1.0), 8);
    assert!(matches!(universe.center_of_mass(), Err(EngineError::Domain(_))));
}

#[test]
fn energy_history_evicts_oldest() {
    let mut history = EnergyHistory::with_capacity(3);
    for i in 0..5 {
        history.push([i as f64, -(i as f64)]);
    }
    assert_eq!(history.len(), 3);
    let kinetic: Vec<f64> = history.iter().map(|s| s[0]).collect();
    assert_eq!(kinetic, vec![2.0, 3.0, 4.0]);
    assert_eq!(history.latest(), Some([4.0, -4.0]));

    let mut universe = two_body_universe(1.0, 1.0, 1.0);
    for _ in 0..200 {
        universe.refresh_energy_values();
    }
    assert_eq!(universe.energy_history().len(), 64);
}

#[test]
fn reference_body_is_found() {
    let mut universe = Universe::new(NewtonianGravity::new(1.0), 8);
    universe.insert(Body::new("a", 1.0, 1.0, Vector::zeros(), Vector::zeros()));
    universe.insert(Body::new("b", 1.0, 1.0, Vector::planar(1.0, 0.0), Vector::zeros()).with_reference(true));
    assert_eq!(universe.reference_body().map(Body::id), Some("b"));
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn verlet_free_body_moves_by_velocity() {
    let mut universe = Universe::new(NewtonianGravity::new(1.0), 8);
    universe.insert(Body::new("drifter", 1.0, 1.0, Vector::planar(1.0, 2.0), Vector::planar(0.5, -0.5)));

    Verlet::default().advance(&mut universe, 1.0);

    let drifter = universe.get("drifter").unwrap();
    assert_eq!(drifter.position, Vector::planar(1.5, 1.5));
    assert_eq!(drifter.velocity, Vector::planar(0.5, -0.5));
}

#[test]
fn verlet_conserves_energy_on_circular_orbit() {
    let drift = relative_energy_drift(&mut Verlet::new(0.02), circular_binary(), 1000);
    assert!(drift < 0.01, "Verlet drifted {:.3e}", drift);
}

#[test]
fn euler_drifts_more_than_verlet() {
    let verlet = relative_energy_drift(&mut Verlet::new(0.02), circular_binary(), 1000);
    let euler = relative_energy_drift(&mut Euler::new(0.02), circular_binary(), 1000);
    assert!(euler > 10.0 * verlet, "euler {:.3e} vs verlet {:.3e}", euler, verlet);
}

#[test]
fn verlet_keeps_circular_orbit_radius() {
    let mut universe = circular_binary();
    let mut verlet = Verlet::new(0.02);
    for _ in 0..1000 {
        verlet.advance(&mut universe, 1.0);
    }
    for body in universe.bodies() {
        let r = body.position.magnitude();
        assert!(close(r, 1.0, 0.01), "{} drifted to r = {}", body.id(), r);
    }
}

#[test]
fn verlet_stores_last_acceleration() {
    let mut universe = two_body_universe(1.0, 1.0, 1.0);
    Verlet::new(0.01).advance(&mut universe, 1.0);
    for body in universe.bodies() {
        assert_eq!(body.last_acceleration, body.acceleration);
        assert!(body.acceleration.magnitude() > 0.0);
    }
}

#[test]
fn static_body_never_moves_but_still_attracts() {
    let start = Vector::new(0.0, 0.0, 0.0);
    let mut universe = Universe::new(NewtonianGravity::new(1.0), 8);
    universe.insert(Body::new("sun", 10.0, 0.1, start, Vector::zeros()).with_static(true));
    universe.insert(Body::new("planet", 1.0, 0.01, Vector::planar(1.0, 0.0), Vector::planar(0.0, 10f64.sqrt())));

    let mut verlet = Verlet::new(0.01);
    for _ in 0..500 {
        verlet.advance(&mut universe, 1.0);

        let sun = universe.get("sun").unwrap();
        assert_eq!(sun.position.x().to_bits(), start.x().to_bits());
        assert_eq!(sun.position.y().to_bits(), start.y().to_bits());
        assert_eq!(sun.position.z().to_bits(), start.z().to_bits());
        assert_eq!(sun.velocity, Vector::zeros());
    }

    // the planet is held on a bound orbit by the pinned sun
    let planet = universe.get("planet").unwrap();
    let toward_sun = start - planet.position;
    assert!(planet.acceleration.0.dot(&toward_sun.0) > 0.0);
    assert!(close(planet.position.magnitude(), 1.0, 0.01));
}

// ==================================================================================
// Configuration tests
// ==================================================================================

const BINARY_YAML: &str = r#"
parameters:
  G: 1.0
  timestep: 0.02
bodies:
  - id: left
    mass: 1.0
    radius: 0.05
    position: [ -1.0, 0.0 ]
    velocity: [ 0.0, -0.5 ]
  - id: right
    mass: 1.0
    radius: 0.05
    position: [ 1.0, 0.0 ]
    velocity: [ 0.0, 0.5 ]
    reference: true
"#;

#[test]
fn scenario_yaml_uses_defaults() {
    let cfg = ScenarioConfig::from_yaml_str(BINARY_YAML).unwrap();
    assert_eq!(cfg.engine.frame_rate, 60);
    assert_eq!(cfg.engine.energy_interval, 10);
    assert_eq!(cfg.parameters.g, 1.0);
    assert!(!cfg.bodies[0].is_static);
    assert!(cfg.bodies[1].is_reference);

    let scenario = Scenario::build_scenario(&cfg).unwrap();
    assert_eq!(scenario.universe.len(), 2);
    assert!(scenario.universe.forces_primed());
    assert_eq!(scenario.universe.energy_history().len(), 1);
    assert!(close(scenario.universe.total_energy()[0] + scenario.universe.total_energy()[1], -0.25, 1e-12));
    assert_eq!(scenario.integrator().name(), "verlet");
}

#[test]
fn shipped_scenarios_build() {
    for name in ["two_body.yaml", "sun_earth.yaml"] {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(name);
        let cfg = ScenarioConfig::from_path(&path).unwrap();
        assert!(Scenario::build_scenario(&cfg).is_ok(), "{name} did not build");
    }
}

#[test]
fn bad_definitions_abort_construction() {
    let duplicate = BINARY_YAML.replace("id: right", "id: left");
    let massless = BINARY_YAML.replacen("mass: 1.0", "mass: 0.0", 1);
    let flat_radius = BINARY_YAML.replacen("radius: 0.05", "radius: -1.0", 1);
    let short_vector = BINARY_YAML.replacen("[ -1.0, 0.0 ]", "[ -1.0 ]", 1);
    let still = BINARY_YAML.replace("timestep: 0.02", "timestep: 0.0");

    for yaml in [duplicate, massless, flat_radius, short_vector, still] {
        let cfg = ScenarioConfig::from_yaml_str(&yaml).unwrap();
        let err = Scenario::build_scenario(&cfg).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)), "unexpected {err:?}");
    }
}

#[test]
fn zero_frame_rate_is_rejected() {
    let yaml = format!("engine:\n  frame_rate: 0\n{BINARY_YAML}");
    let cfg = ScenarioConfig::from_yaml_str(&yaml).unwrap();
    assert!(matches!(Scenario::build_scenario(&cfg), Err(EngineError::Configuration(_))));
}

#[test]
fn missing_bodies_is_a_parse_error() {
    assert!(ScenarioConfig::from_yaml_str("engine:\n  frame_rate: 30\n").is_err());
}
