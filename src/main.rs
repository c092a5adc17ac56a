use chrono::Local;
use log::{error, info};
use pipetory::config::CONFIG;
use pipetory::demos::{numeric, split_merge, table};
use pipetory::errors::AppError;
use pipetory::Dataset;

fn init_logging() {
    // RUST_LOG tiene prioridad sobre PIPETORY_LOG
    env_logger::Builder::new().filter_level(CONFIG.log_level)
                              .parse_default_env()
                              .init();
}

fn run_numeric() -> Result<(), AppError> {
    let pipe = numeric::numeric_pipe(CONFIG.weight)?;
    let x = numeric::matrix(CONFIG.rows, CONFIG.cols);
    info!("{pipe} steps={:?}", pipe.steps());
    let squared = pipe.call(x.clone(), Some("square"))?;
    println!("[numpy] square: {:?}", squared);
    println!("[numpy] weighted_log: {:?}", pipe.run(x)?);
    Ok(())
}

fn run_table() -> Result<(), AppError> {
    let pipe = table::people_pipe(Local::now().date_naive())?;
    info!("{pipe} hash={}", pipe.definition_hash());
    for step in pipe.steps() {
        let out = pipe.call(table::sample_people(), Some(step))?;
        println!("[df1] {step}: {}", serde_json::to_string(&out)?);
    }
    Ok(())
}

fn run_split_merge() -> Result<(), AppError> {
    let typed = table::assign_types(table::sample_people())?;
    let pipe = split_merge::gender_pipe();
    info!("{pipe} describe={}", pipe.describe());
    let groups = pipe.call(Dataset::Single(typed.clone()), Some("split"))?;
    println!("[by_gender] groups: {}", groups.into_vec().len());
    let merged = pipe.run(Dataset::Single(typed))?.into_vec().concat();
    println!("[by_gender] merged: {}", serde_json::to_string(&merged)?);
    Ok(())
}

fn run() -> Result<(), AppError> {
    CONFIG.validate()?;
    run_numeric()?;
    run_table()?;
    run_split_merge()
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        error!("demo failed: {e}");
        std::process::exit(1);
    }
}
