use crate::cli::BriefingArgs;
use anyhow::Result;
use salesai_core::{BriefingRenderer, MarkdownRenderer, Role};

pub async fn run(args: BriefingArgs) -> Result<()> {
    let engine = args.completion.build_engine()?;
    let role = Role::parse(&args.role);

    let briefing = engine.generate(&args.account_id, &role, &args.query).await?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&briefing)?),
        _ => println!("{}", MarkdownRenderer::default().render(&briefing)),
    }

    Ok(())
}
