use anyhow::Result;
use clap::{crate_version, App as Cli, Arg};
use workspace_board::{app::App, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new("workspace-board")
        .version(crate_version!())
        .about("Browse workspace projects and arrange tasks on a board")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml and preferences.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("api-url")
                .short("u")
                .long("api-url")
                .value_name("URL")
                .help("Base URL of the workspace API")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("workspace")
                .short("w")
                .long("workspace")
                .value_name("ID")
                .help("Workspace to open when no selection is stored")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(url) = matches.value_of("api-url") {
        config.api_base_url = url.to_string();
    }
    if let Some(workspace) = matches.value_of("workspace") {
        config.default_workspace_id = Some(workspace.to_string());
    }

    App::start(config).await?;
    Ok(())
}
