use aiq_core::{
    record::{LatestRecorder, RecordPolicy},
    Agent, AgentError, Configurable, EncodingMode, RefmShape,
};
use aiq_candle_agent::{opt::OptimizerConfig, vpg::{Vpg, VpgConfig}};
use anyhow::Result;
use std::fs;
use tempdir::TempDir;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn agent(refm: &RefmShape, config: VpgConfig) -> Vpg {
    Vpg::build(refm, 0.99, config).unwrap()
}

fn assert_distribution(probs: &[f32], num_actions: usize) {
    assert_eq!(probs.len(), num_actions);
    assert!(probs.iter().all(|&p| (0.0..=1.0).contains(&p)), "{:?}", probs);
    assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-5, "{:?}", probs);
}

#[test]
fn test_display_and_dimensions() {
    init_logger();
    let refm = RefmShape::dense(3, 2, 4).unwrap();
    let agent = agent(&refm, VpgConfig::default());

    assert_eq!(agent.to_string(), "VPG(10,0.99)");
    assert_eq!(agent.obs_dim(), 6);
    assert_eq!(agent.num_actions(), 4);
    assert_eq!(agent.buffer_len(), 0);
}

#[test]
fn test_update_every_epoch() -> Result<()> {
    init_logger();
    let refm = RefmShape::dense(4, 1, 3).unwrap();
    let steps_per_epoch = 4;
    let mut agent = agent(
        &refm,
        VpgConfig::default()
            .steps_per_epoch(steps_per_epoch)
            .record_policy(RecordPolicy::AppendLog),
    );

    for t in 0..(3 * steps_per_epoch) {
        let action = agent.perceive(&[t % 4], 1.0)?;
        assert!(action < 3);

        let n_calls = t + 1;
        assert!(agent.buffer_len() < steps_per_epoch);
        assert_eq!(agent.buffer_len(), n_calls % steps_per_epoch);
        assert_eq!(agent.epoch_step(), n_calls % steps_per_epoch);
        assert_eq!(agent.n_epochs(), n_calls / steps_per_epoch);
    }

    let records = agent.recorder().records();
    assert_eq!(records.len(), 3);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.get_integer("epoch")?, i as i64);
        assert_eq!(record.get_integer("n_steps")?, steps_per_epoch as i64);
        assert!(record.get_scalar("loss")?.is_finite());
        // Rewards of 1 discounted by 0.99 over four steps.
        let expected = (1.0 + 1.99 + 2.9701 + 3.940399) / 4.0;
        assert!((record.get_scalar("mean_return")? - expected).abs() < 1e-4);
    }
    Ok(())
}

#[test]
fn test_single_step_epochs() -> Result<()> {
    init_logger();
    let refm = RefmShape::dense(2, 1, 2).unwrap();
    let mut agent = agent(&refm, VpgConfig::default().steps_per_epoch(1));

    for t in 0..5 {
        agent.perceive(&[t % 2], 0.5)?;
        assert_eq!(agent.buffer_len(), 0);
        assert_eq!(agent.n_epochs(), t + 1);
    }
    Ok(())
}

#[test]
fn test_buffer_contents() -> Result<()> {
    init_logger();
    let refm = RefmShape::dense(3, 1, 2).unwrap();
    let mut agent = agent(&refm, VpgConfig::default().steps_per_epoch(10));

    let a0 = agent.perceive(&[2], 1.0)?;
    let a1 = agent.perceive(&[0], -0.5)?;

    let buffer = agent.buffer();
    assert_eq!(buffer.states(), &[2, 0]);
    assert_eq!(buffer.actions(), &[a0 as u32, a1 as u32]);
    assert_eq!(buffer.rewards(), &[1.0, -0.5]);
    Ok(())
}

#[test]
fn test_wrong_observation_length() -> Result<()> {
    init_logger();
    let refm = RefmShape::dense(2, 2, 2).unwrap();
    let mut agent = agent(&refm, VpgConfig::default().steps_per_epoch(3));
    agent.perceive(&[0, 1], 1.0)?;
    let buffer = agent.buffer().clone();

    let err = agent.perceive(&[0], 1.0).unwrap_err();
    assert_eq!(
        err.downcast_ref::<AgentError>(),
        Some(&AgentError::InvalidObservationShape {
            expected: 2,
            got: 1
        })
    );
    assert_eq!(agent.buffer(), &buffer);
    assert_eq!(agent.epoch_step(), 1);
    Ok(())
}

#[test]
fn test_state_outside_feature_width() {
    init_logger();
    // With the last cell only, [0, 2] encodes to 2 * 3 = 6, beyond 3 * 2 features.
    let refm = RefmShape::dense(3, 2, 2).unwrap();
    let mut agent = agent(&refm, VpgConfig::default());

    let err = agent.perceive(&[0, 2], 0.0).unwrap_err();
    assert_eq!(
        err.downcast_ref::<AgentError>(),
        Some(&AgentError::StateOutOfRange { state: 6, size: 6 })
    );
    assert_eq!(agent.buffer_len(), 0);

    let mut mixed = Vpg::build(&refm, 0.99, VpgConfig::default().encoding(EncodingMode::MixedRadix))
        .unwrap();
    assert!(mixed.perceive(&[1, 2], 0.0).is_err());
    assert!(mixed.perceive(&[2, 1], 0.0).is_ok());
}

#[test]
fn test_invalid_configuration() {
    init_logger();
    let refm = RefmShape::dense(2, 1, 2).unwrap();
    let err = Vpg::build(&refm, 0.99, VpgConfig::default().steps_per_epoch(0))
        .err()
        .unwrap();
    assert!(matches!(
        err.downcast_ref::<AgentError>(),
        Some(AgentError::InvalidConfiguration(_))
    ));

    let no_actions = RefmShape::dense(2, 1, 0).unwrap();
    assert!(Vpg::build(&no_actions, 0.99, VpgConfig::default()).is_err());
}

#[test]
fn test_reset_keeps_parameters() -> Result<()> {
    init_logger();
    let refm = RefmShape::dense(2, 1, 3).unwrap();
    let mut agent = agent(
        &refm,
        VpgConfig::default()
            .steps_per_epoch(3)
            .record_policy(RecordPolicy::AppendLog),
    );
    for t in 0..5 {
        agent.perceive(&[t % 2], 1.0)?;
    }
    assert_eq!(agent.buffer_len(), 2);
    let probs = agent.policy_probs(&[1])?;

    agent.reset();
    assert_eq!(agent.buffer_len(), 0);
    assert_eq!(agent.epoch_step(), 0);
    assert_eq!(agent.n_epochs(), 0);
    assert!(agent.recorder().records().is_empty());
    assert_eq!(agent.policy_probs(&[1])?, probs);

    agent.reset_policy()?;
    assert_distribution(&agent.policy_probs(&[1])?, 3);
    Ok(())
}

#[test]
fn test_policy_probs_is_distribution() -> Result<()> {
    init_logger();
    let refm = RefmShape::dense(5, 1, 4).unwrap();
    let agent = agent(&refm, VpgConfig::default());
    for o in 0..5 {
        assert_distribution(&agent.policy_probs(&[o])?, 4);
    }
    Ok(())
}

#[test]
fn test_latest_update_record() -> Result<()> {
    init_logger();
    let refm = RefmShape::dense(2, 1, 2).unwrap();
    let mut agent = agent(&refm, VpgConfig::default().steps_per_epoch(2))
        .with_recorder(Box::new(LatestRecorder::new()));
    for _ in 0..6 {
        agent.perceive(&[0], 0.0)?;
    }
    let records = agent.recorder().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get_integer("epoch")?, 2);
    // Zero returns give a zero pseudo-loss.
    assert_eq!(records[0].get_scalar("loss")?, 0.0);
    Ok(())
}

#[test]
fn test_loss_weights_log_probs_by_rewards_to_go() -> Result<()> {
    init_logger();
    let refm = RefmShape::dense(3, 1, 2).unwrap();
    let mut agent = agent(
        &refm,
        VpgConfig::default()
            .steps_per_epoch(3)
            .gamma(0.5)
            .record_policy(RecordPolicy::AppendLog),
    );
    let states = [0, 2, 1];
    let rewards = [1.0, -2.0, 3.0];

    // Parameters stay fixed until the last step of the epoch.
    let probs = states
        .iter()
        .map(|&s| agent.policy_probs(&[s]))
        .collect::<Result<Vec<_>>>()?;
    let mut actions = vec![];
    for (&s, &r) in states.iter().zip(rewards.iter()) {
        actions.push(agent.perceive(&[s], r)?);
    }
    assert_eq!(agent.n_epochs(), 1);

    // 1 + 0.5 * -0.5, -2 + 0.5 * 3, 3
    let returns = [0.75, -0.5, 3.0];
    let expected: f64 = -(0..3)
        .map(|i| (probs[i][actions[i]] as f64).ln() * returns[i])
        .sum::<f64>();

    let record = &agent.recorder().records()[0];
    let loss = record.get_scalar("loss")?;
    assert!(
        (loss - expected).abs() < 1e-4 * expected.abs().max(1.0),
        "expected {}, got {}",
        expected,
        loss
    );
    assert!((record.get_scalar("mean_return")? - 3.25 / 3.0).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_buffer_bounded_with_non_finite_rewards() {
    init_logger();
    let refm = RefmShape::dense(2, 1, 2).unwrap();
    let steps_per_epoch = 3;
    let mut agent = agent(&refm, VpgConfig::default().steps_per_epoch(steps_per_epoch));

    for t in 0..10 {
        // Later calls may fail once the parameters are no longer finite.
        let _ = agent.perceive(&[t % 2], f64::NAN);
        assert!(agent.buffer_len() < steps_per_epoch);
        assert!(agent.epoch_step() < steps_per_epoch);
        assert_eq!(agent.buffer_len(), agent.epoch_step());
    }
    assert!(agent.n_epochs() >= 1);
}

#[test]
fn test_dump_update_records() -> Result<()> {
    init_logger();
    let refm = RefmShape::dense(2, 1, 2).unwrap();
    let mut agent = agent(
        &refm,
        VpgConfig::default()
            .steps_per_epoch(2)
            .record_policy(RecordPolicy::AppendLog),
    );
    for t in 0..4 {
        agent.perceive(&[t % 2], 1.0)?;
    }

    let dir = TempDir::new("vpg")?;
    let path = agent.dump_records(dir.path())?;
    let file_name = path.file_name().unwrap().to_str().unwrap();
    assert!(file_name.starts_with("VPG(2,0.99)_"), "{}", file_name);

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    let epochs: Vec<i64> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["epoch"].as_i64().unwrap())
        .collect();
    assert_eq!(epochs, vec![0, 1]);
    Ok(())
}

#[test]
fn test_learns_rewarded_action() -> Result<()> {
    init_logger();
    // The reward passed at each step pays for the previous action: 1 for action 1, else 0.
    let refm = RefmShape::dense(1, 1, 2).unwrap();
    let mut agent = agent(
        &refm,
        VpgConfig::default()
            .steps_per_epoch(10)
            .gamma(0.9)
            .opt_config(OptimizerConfig::default().with_lr(0.02)),
    );

    let mut action = 0;
    for _ in 0..6000 {
        let reward = if action == 1 { 1.0 } else { 0.0 };
        action = agent.perceive(&[0], reward)?;
    }

    let probs = agent.policy_probs(&[0])?;
    assert!(probs[1] > 0.55, "{:?}", probs);
    Ok(())
}
