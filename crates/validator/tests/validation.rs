//! End-to-end validation through the public API.

use game_core::{
    FraudReason, GameConfig, Inventory, InventoryItem, ItemVariant, Move, Platform, Session,
    ValidationResult, generate_platforms, seed_number_from_hex,
};
use session_validator::{
    SessionValidator, ValidationError, ValidatorConfig, generate_signed_seed, validate,
    validate_with_trace,
};

const SECRET: &str = "integration-secret";
const SEED: &str = "9f1c2e7d4b0a86531e2f9d7c6b5a4938271605f4e3d2c1b0a9f8e7d6c5b4a3f2";

fn never(_: &ValidationResult) -> bool {
    false
}

fn always(_: &ValidationResult) -> bool {
    true
}

fn signed_session(moves: Vec<Move>) -> Session {
    let signature = session_validator::SeedSigner::new(SECRET).sign(SEED);
    Session::new(SEED, signature, moves)
}

fn stationary_validator() -> SessionValidator {
    let mut game = GameConfig::default();
    game.patrol.move_chance = 0.0;
    SessionValidator::new(ValidatorConfig::new(game, SECRET)).unwrap()
}

/// Moves landing `offsets[i]` px right of each successive platform center.
fn aimed_moves(game: &GameConfig, offsets: &[f64]) -> Vec<Move> {
    const GAPS: [f64; 6] = [430.0, 615.0, 362.0, 890.0, 511.0, 744.0];
    let seed_number = seed_number_from_hex(SEED).unwrap();
    let platforms: Vec<Platform> = generate_platforms(game, seed_number, offsets.len() + 2);

    let mut stop = platforms[0].right();
    let mut start = 0.0;
    offsets
        .iter()
        .enumerate()
        .map(|(i, offset)| {
            let target = &platforms[i + 1];
            let distance = target.center() + offset - stop;
            let duration =
                distance / game.bridge.grow_speed * 1000.0 + game.bridge.rotation_time_ms();
            let mv = Move::new(start, duration);
            start += duration + GAPS[i % GAPS.len()];
            stop = target.right();
            mv
        })
        .collect()
}

fn perfect_except(count: usize, off_center: &[usize]) -> Vec<f64> {
    (0..count)
        .map(|i| {
            if off_center.contains(&i) {
                if i % 2 == 0 { 10.0 } else { -10.0 }
            } else {
                0.0
            }
        })
        .collect()
}

#[test]
fn three_move_session_scores_with_multiplier() {
    let moves = vec![
        Move::new(0.0, 200.0),
        Move::new(500.0, 400.0),
        Move::new(1_200.0, 300.0),
    ];
    let mut inventory = Inventory::default();
    let (outcome, trace) =
        validate_with_trace(&mut inventory, &signed_session(moves), &never, SECRET).unwrap();

    assert_eq!(trace.platforms.len(), 5);
    assert_eq!(trace.moves.len(), 3);
    assert_eq!(outcome.fraud_reason, FraudReason::None);
    assert!(!outcome.is_fraud);
    assert_eq!(outcome.score, trace.raw_points * 10);
    assert_eq!(outcome.time_played, 1_500.0);
}

#[test]
fn validation_is_deterministic() {
    let moves = vec![
        Move::new(0.0, 350.0),
        Move::new(900.0, 420.0).with_idle(60.0),
        Move::new(2_100.0, 280.0),
        Move::new(3_050.0, 510.0),
    ];
    let session = signed_session(moves);
    let first = validate(&mut Inventory::default(), &session, &never, SECRET).unwrap();
    let second = validate(&mut Inventory::default(), &session, &never, SECRET).unwrap();
    assert_eq!(first, second);
}

#[test]
fn forged_signature_is_terminal() {
    let mut session = signed_session(vec![Move::new(0.0, 300.0)]);
    session.signature = session_validator::SeedSigner::new("other").sign(SEED);
    let error = validate(&mut Inventory::default(), &session, &always, SECRET).unwrap_err();
    assert!(matches!(error, ValidationError::InvalidSignature));
}

#[test]
fn signed_non_hex_seed_is_terminal() {
    let seed = "not-a-hex-seed";
    let signature = session_validator::SeedSigner::new(SECRET).sign(seed);
    let session = Session::new(seed, signature, vec![Move::new(0.0, 300.0)]);
    let error = validate(&mut Inventory::default(), &session, &always, SECRET).unwrap_err();
    assert!(matches!(error, ValidationError::InvalidSeed(_)));
}

#[test]
fn issued_seed_validates() {
    let issued = generate_signed_seed(SECRET);
    let session = Session::new(issued.seed, issued.signature, vec![Move::new(0.0, 300.0)]);
    assert!(validate(&mut Inventory::default(), &session, &never, SECRET).is_ok());
}

#[test]
fn overlapping_moves_are_invalid_data() {
    let moves = vec![Move::new(0.0, 400.0), Move::new(399.0, 300.0)];
    let outcome = validate(
        &mut Inventory::default(),
        &signed_session(moves),
        &always,
        SECRET,
    )
    .unwrap();
    assert_eq!(outcome.fraud_reason, FraudReason::InvalidData);
    assert_eq!(outcome.score, 0);
    assert!(!outcome.is_fraud);
    assert!(!outcome.streak_challenge_completed);
}

#[test]
fn empty_session_is_invalid_data() {
    let outcome = validate(
        &mut Inventory::default(),
        &signed_session(Vec::new()),
        &always,
        SECRET,
    )
    .unwrap();
    assert_eq!(outcome.fraud_reason, FraudReason::InvalidData);
    assert_eq!(outcome.score, 0);
    assert_eq!(outcome.blocks_passed, 0);
}

#[test]
fn insufficient_items_leave_inventory_untouched() {
    let shield = ItemVariant::from("shield");
    let mut inventory = Inventory::new(vec![InventoryItem::consumable("shield", 2)]);
    let snapshot = inventory.clone();
    let session = signed_session(vec![Move::new(0.0, 300.0)])
        .with_used_items(vec![shield.clone(), shield.clone(), shield.clone()]);

    let outcome = validate(&mut inventory, &session, &always, SECRET).unwrap();
    assert_eq!(outcome.fraud_reason, FraudReason::InvalidItem);
    assert_eq!(outcome.score, 0);
    assert_eq!(inventory, snapshot);
}

#[test]
fn sufficient_items_are_spent() {
    let shield = ItemVariant::from("shield");
    let mut inventory = Inventory::new(vec![InventoryItem::consumable("shield", 2)]);
    let session = signed_session(vec![Move::new(0.0, 300.0)])
        .with_used_items(vec![shield.clone(), shield.clone()]);

    let outcome = validate(&mut inventory, &session, &never, SECRET).unwrap();
    assert_ne!(outcome.fraud_reason, FraudReason::InvalidItem);
    assert_eq!(inventory.quantity_of(&shield), Some(0));
}

#[test]
fn short_session_with_high_perfect_rate_is_fraud() {
    let validator = stationary_validator();
    // 13 of 15 perfect, about 87%
    let moves = aimed_moves(validator.game_config(), &perfect_except(15, &[3, 9]));
    let outcome = validator
        .validate(&mut Inventory::default(), &signed_session(moves), &always)
        .unwrap();

    assert_eq!(outcome.blocks_passed, 15);
    assert!(outcome.is_fraud);
    assert_eq!(outcome.fraud_reason, FraudReason::PerfectRateTooHigh);
    assert!(!outcome.streak_challenge_completed);
}

#[test]
fn long_session_at_relaxed_threshold_is_clean() {
    let validator = stationary_validator();
    // 18 of 20 perfect, exactly 90%
    let moves = aimed_moves(validator.game_config(), &perfect_except(20, &[6, 13]));
    let outcome = validator
        .validate(&mut Inventory::default(), &signed_session(moves), &always)
        .unwrap();

    assert_eq!(outcome.blocks_passed, 20);
    assert_eq!(outcome.fraud_reason, FraudReason::None);
    assert!(!outcome.is_fraud);
    assert_eq!(outcome.score, (18 * 3 + 2) * 10);
    assert!(outcome.streak_challenge_completed);
}

#[test]
fn daily_challenge_sees_the_replay_result() {
    let validator = stationary_validator();
    let moves = aimed_moves(validator.game_config(), &[0.0, 10.0, -10.0, 0.0, 10.0, -10.0, 0.0, 10.0]);
    let session = signed_session(moves);

    let all_eight = |result: &ValidationResult| result.blocks_passed >= 8;
    let nine = |result: &ValidationResult| result.blocks_passed >= 9;

    let met = validator
        .validate(&mut Inventory::default(), &session, &all_eight)
        .unwrap();
    let missed = validator
        .validate(&mut Inventory::default(), &session, &nine)
        .unwrap();

    assert_eq!(met.fraud_reason, FraudReason::None);
    assert!(met.streak_challenge_completed);
    assert!(!missed.streak_challenge_completed);
}

#[test]
fn daily_challenge_is_skipped_for_unawarded_sessions() {
    let called = std::cell::Cell::new(false);
    let spy = |_: &ValidationResult| {
        called.set(true);
        true
    };
    let outcome = validate(
        &mut Inventory::default(),
        &signed_session(Vec::new()),
        &spy,
        SECRET,
    )
    .unwrap();
    assert!(!outcome.streak_challenge_completed);
    assert!(!called.get());
}

#[test]
fn invalid_tuning_is_rejected_at_construction() {
    let mut game = GameConfig::default();
    game.platforms.min_gap = 300.0;
    let error = SessionValidator::new(ValidatorConfig::new(game, SECRET)).unwrap_err();
    assert!(matches!(error, ValidationError::InvalidConfig(_)));
}

#[test]
fn empty_secret_is_rejected_at_construction() {
    let error = SessionValidator::new(ValidatorConfig::new(GameConfig::default(), "")).unwrap_err();
    assert!(matches!(error, ValidationError::EmptySecret));

    let signature = session_validator::SeedSigner::new("").sign(SEED);
    let session = Session::new(SEED, signature, vec![Move::new(0.0, 300.0)]);
    let error = validate(&mut Inventory::default(), &session, &always, "").unwrap_err();
    assert!(matches!(error, ValidationError::EmptySecret));
}

#[test]
fn overflowing_multiplier_is_rejected_at_construction() {
    let mut game = GameConfig::default();
    game.bridge.score_multiplier = u32::MAX;
    let error = SessionValidator::new(ValidatorConfig::new(game, SECRET)).unwrap_err();
    assert!(matches!(error, ValidationError::InvalidConfig(_)));
}

#[test]
fn session_json_uses_camel_case() {
    let json = r#"{
        "seed": "abc123",
        "signature": "00",
        "moves": [
            { "startTime": 0, "duration": 250 },
            { "startTime": 900, "duration": 310, "idleDurationMs": 45 }
        ],
        "usedItems": ["shield"]
    }"#;
    let session: Session = serde_json::from_str(json).unwrap();
    assert_eq!(session.moves[1].idle_duration_ms, Some(45.0));
    assert_eq!(session.used_items, vec![ItemVariant::from("shield")]);

    let outcome = validate(&mut Inventory::default(), &signed_session(Vec::new()), &never, SECRET)
        .unwrap();
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["fraudReason"], "INVALID_DATA");
    assert_eq!(value["streakChallengeCompleted"], false);
}
