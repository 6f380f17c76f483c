use bondex_core::builtin_patterns;
use bondex_core::patterns::{DEFAULT_TEMPLATE, NAME_ALIASES, NAME_TEMPLATE};

/// Strategy for listing the builtin pattern registry.
#[derive(Debug, Clone, Copy)]
pub struct PatternsStrategy;

impl super::CommandStrategy for PatternsStrategy {
    type Input = ();

    fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        println!("=== Builtin patterns ===\n");
        for pattern in builtin_patterns() {
            println!(
                "{:<8} {:<20} {:<8} {}",
                pattern.key,
                pattern.alias,
                pattern.kind.as_str(),
                pattern.template
            );
        }
        println!();

        println!("Name fields ({}):", NAME_ALIASES.join(", "));
        println!("  {}", NAME_TEMPLATE.template());
        println!();

        println!("Any other key:");
        println!("  {}", DEFAULT_TEMPLATE.template());
        Ok(())
    }
}
