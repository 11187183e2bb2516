use anyhow::Result;

pub async fn handle_version() -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const NAME: &str = env!("CARGO_PKG_NAME");
    const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

    println!("{} v{}", NAME, VERSION);
    println!("By: {}", AUTHORS);

    let features: Vec<&str> = [cfg!(feature = "clipboard").then_some("clipboard")]
        .into_iter()
        .flatten()
        .collect();
    if features.is_empty() {
        println!("Features: none");
    } else {
        println!("Features: {}", features.join(", "));
    }
    Ok(())
}
