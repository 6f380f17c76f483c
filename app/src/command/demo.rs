use bondex_core::{ExtractedValue, FieldMap, MatchGroup, PatternSource, extract_fields};

/// Exchangeable-bond prospectus excerpt used by `bondex demo`.
pub const SAMPLE_TEXT: &str = "
标的证券：本期发行的证券为可交换为发行人所持中国长江电力股份
有限公司股票（股票代码：600900.SH，股票简称：长江电力）的可交换公司债
券。
换股期限：本期可交换公司债券换股期限自可交换公司债券发行结束
之日满 12 个月后的第一个交易日起至可交换债券到期日止，即 2023 年 6 月 2
日至 2027 年 6 月 1 日止。
";

/// Underlying security plus exchange window, both from the builtin registry.
#[must_use]
pub fn demo_groups() -> Vec<MatchGroup> {
    let mut group = MatchGroup::new();
    group.insert("标的证券".to_string(), PatternSource::Predefined);
    group.insert("换股期限".to_string(), PatternSource::Predefined);
    vec![group]
}

fn expected() -> Vec<FieldMap> {
    let mut fields = FieldMap::new();
    fields.insert("标的证券".to_string(), ExtractedValue::scalar("600900.SH"));
    fields.insert(
        "换股期限".to_string(),
        ExtractedValue::list(["2023-06-02", "2027-06-01"]),
    );
    vec![fields]
}

/// Strategy that runs the bundled sample and checks the result.
#[derive(Debug, Clone, Copy)]
pub struct DemoStrategy;

impl super::CommandStrategy for DemoStrategy {
    type Input = ();

    fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let groups = demo_groups();
        let results = extract_fields(SAMPLE_TEXT, &groups);

        println!("Sample text:");
        println!("{}", "-".repeat(40));
        println!("{SAMPLE_TEXT}");
        println!("{}", "-".repeat(40));
        println!();
        println!("Groups: {}", serde_json::to_string(&groups)?);
        println!("Results: {}", serde_json::to_string(&results)?);

        let expected = expected();
        if results == expected {
            println!();
            println!("✅ Demo passed");
            Ok(())
        } else {
            anyhow::bail!(
                "Demo failed. Expected: {}, actual: {}",
                serde_json::to_string(&expected)?,
                serde_json::to_string(&results)?
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_matches_expected() {
        assert_eq!(extract_fields(SAMPLE_TEXT, &demo_groups()), expected());
    }
}
