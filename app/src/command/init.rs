use bondex_config::Config;
use tracing::info;

/// Strategy for initializing the configuration.
///
/// Creates the default configuration file at `~/bondex/config.json`.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::create_config()?;
        info!("Wrote config template");

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Add or edit extraction profiles under \"extraction.profiles\"");
        println!("   2. Run 'bondex patterns' to list the builtin field keys");
        println!("   3. Run 'bondex extract --profile <name> <files...>'");
        println!();
        println!("🔧 Configuration options:");
        println!("   - logging.level: tracing filter, overridden by RUST_LOG");
        println!("   - extraction.default_profile: profile used when none is given");
        println!("   - \"*自定义*\" as a pattern selects the builtin for that key");
        println!();
        Ok(())
    }
}
