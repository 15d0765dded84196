use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use bsfs_api::ApiConfig;
use bsfs_api::DEFAULT_SERVER;
use bsfs_api::DEFAULT_TIMEOUT_SECS;
use bsfs_api::HttpApi;
use bsfs_api::OpenerUrl;
use bsfs_browse::Handle;
use bsfs_browse::Info;
use bsfs_browse::Namespace;
use bsfs_browse::Page;
use clap::Parser;
use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Browse a BaseSpace account as a read-only directory tree.
#[derive(Parser)]
#[command(name = "bsfs-browse")]
struct Cli
{
    /// Opener URL, `basespace://ID:SECRET:TOKEN@SERVER!/ROOT`.
    /// Takes precedence over the individual options below.
    #[arg(long, env = "BASESPACE_URL")]
    url: Option<String>,

    #[arg(long, env = "BASESPACE_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    #[arg(long, env = "BASESPACE_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[arg(long, env = "BASESPACE_CLIENT_ID")]
    client_id: Option<String>,

    #[arg(long, env = "BASESPACE_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Path under which all other paths are taken.
    #[arg(long, env = "BASESPACE_ROOT")]
    root: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command
{
    /// List the children of a path.
    Ls{
        path: String,

        /// Index of the first child to list.
        #[arg(long)]
        start: Option<u64>,

        /// Index one past the last child to list.
        #[arg(long)]
        end: Option<u64>,

        /// Print the info of each child as JSON.
        #[arg(short, long)]
        long: bool,
    },

    /// Print the info of a path as JSON.
    Info{
        path: String,
    },

    /// Download a file.
    Get{
        path: String,

        /// Where to write the file; standard output if left out.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()>
{
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (config, root) = configure(&cli)?;
    let api = HttpApi::new(config).context("Create HTTP client")?;
    let namespace = Namespace::new(api, &root)?;

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    match cli.command {

        Command::Ls{path, start, end, long} => {
            let page = match (start, end) {
                (None, None) => None,
                (start, end) => Some(Page::new(start.unwrap_or(0),
                                               end.unwrap_or(u64::MAX))),
            };
            if long {
                for info in namespace.scandir(&path, page)? {
                    serde_json::to_writer(&mut stdout, &info)?;
                    writeln!(stdout)?;
                }
            } else {
                for handle in namespace.list(&path, page)? {
                    writeln!(stdout, "{}", handle.id())?;
                }
            }
        },

        Command::Info{path} => {
            let info: Info = namespace.getinfo(&path)?;
            serde_json::to_writer_pretty(&mut stdout, &info)?;
            writeln!(stdout)?;
        },

        Command::Get{path, output} => {
            let entity = match namespace.resolve(&path)? {
                Handle::Entity(entity) if entity.is_leaf() => entity,
                _ => bail!("Not a file: {}", path),
            };
            let written = match output {
                Some(output) => {
                    let file = File::create(&output).with_context(|| {
                        format!("Create {}", output.display())
                    })?;
                    let mut writer = BufWriter::new(file);
                    let written = namespace.api()
                        .download(entity.payload(), &mut writer)?;
                    writer.flush()?;
                    written
                },
                None => namespace.api().download(entity.payload(), &mut stdout)?,
            };
            tracing::info!(%path, written, "downloaded");
        },

    }

    stdout.flush()?;
    Ok(())
}

/// Connection settings and browse root from the command line.
fn configure(cli: &Cli) -> Result<(ApiConfig, String)>
{
    if let Some(url) = &cli.url {
        let OpenerUrl{mut config, root} =
            url.parse().context("Parse opener URL")?;
        config.timeout_secs = cli.timeout;
        let root = cli.root.clone().unwrap_or(root);
        return Ok((config, root));
    }

    let access_token = match &cli.access_token {
        Some(token) if !token.is_empty() => token.clone(),
        _ => bail!("Either --url or --access-token is required"),
    };

    let mut config = ApiConfig::new(&cli.server, access_token)
        .context("Parse server URL")?;
    config.client_id = cli.client_id.clone();
    config.client_secret = cli.client_secret.clone();
    config.timeout_secs = cli.timeout;

    let root = cli.root.clone().unwrap_or_else(|| "/".to_string());
    Ok((config, root))
}
