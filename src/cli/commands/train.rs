//! Train command - self-play between two learning players

use anyhow::{Context, Result};

use crate::{
    app::App,
    cli::{
        config::Args,
        output::{create_training_progress, print_kv, print_section, print_summary, tally_message},
    },
    training::{TrainingSummary, train_with_observer},
};

pub fn execute(app: &App, args: &Args, games: usize) -> Result<TrainingSummary> {
    let config = args.learning_config();
    config.validate().context("invalid learning parameters")?;

    let brain_config = args.brain_config();
    let brain = app.create_brain(&brain_config).with_context(|| {
        format!(
            "failed to load training data from {}",
            brain_config.input.display()
        )
    })?;

    print_section("Training");
    print_kv("Games", &games.to_string());
    print_kv("Input", &brain_config.input.display().to_string());
    print_kv("Output", &brain_config.output.display().to_string());
    print_kv("Exploration rate", &config.exploration_rate.to_string());
    print_kv("Learn rate", &config.learn_rate.to_string());
    print_kv("Decay rate", &config.decay_rate.to_string());

    let progress = create_training_progress(games as u64);
    let mut tally = TrainingSummary::default();
    let summary = train_with_observer(games, &brain, &config, app.default_seed(), |_, result| {
        tally.record(result.outcome);
        progress.set_message(tally_message(&tally));
        progress.inc(1);
    })
    .with_context(|| {
        format!(
            "training failed (results go to {})",
            brain_config.output.display()
        )
    })?;
    progress.finish_with_message(tally_message(&summary));

    print_section("Results");
    print_summary(&summary);
    Ok(summary)
}
