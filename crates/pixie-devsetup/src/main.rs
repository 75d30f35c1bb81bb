use pixie_devsetup::SetupConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SetupConfig::detect()?;
    pixie_devsetup::run(&config)?;
    Ok(())
}
