use chrono::NaiveDate;
use swissmeteo::{load_meteo_file, Config, Frequency, SwissMeteoError, SAVE_DIRECTORY};

#[tokio::main]
async fn main() -> Result<(), SwissMeteoError> {
    let config = Config::builder()
        .frequency(Frequency::Daily)
        .start_date(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
        .end_date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap())
        .global_meteo(true)
        .build();
    println!("{}", config);

    let table = load_meteo_file(&config).await?;
    println!("{:#?}", table.to_dataframe()?);

    if let Some(path) = config.get_path(SAVE_DIRECTORY) {
        table.write_parquet(path).await?;
        println!("Saved to {}", path.display());
    }

    Ok(())
}
