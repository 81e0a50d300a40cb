// Exports a payload from a file or stdin the same way the app does, without a browser

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::{
        io::Read,
        path::{Path, PathBuf},
    };

    use anyhow::Context;
    use clap::Parser;
    use json_export::{export::ExportRequest, sink::DirectorySink};

    #[derive(Parser, Debug)]
    #[command(about = "Save a json payload as <name>.json")]
    struct Args {
        /// File holding the payload, stdin if omitted
        input: Option<PathBuf>,
        /// Base-name of the exported file, without ".json"
        #[arg(short, long)]
        name: Option<String>,
        /// Directory the file is written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        /// Print the data uri instead of writing a file
        #[arg(long)]
        print_uri: bool,
        /// Warn when the payload isn't valid json (it is exported regardless)
        #[arg(long)]
        check: bool,
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::init();
        let args = Args::parse();

        let payload = match &args.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path.display()))?,
            None => {
                let mut s = String::new();
                std::io::stdin()
                    .read_to_string(&mut s)
                    .context("failed to read stdin")?;
                s
            }
        };

        if args.check && !is_json(&payload) {
            log::warn!("payload is not valid json, exporting it anyway");
        }

        let name = args
            .name
            .clone()
            .unwrap_or_else(|| default_name(args.input.as_deref()));
        let request = ExportRequest::new(payload, name);

        if args.print_uri {
            println!("{}", request.link().href);
            return Ok(());
        }

        let mut sink = DirectorySink::new(&args.out_dir);
        request
            .send(&mut sink)
            .with_context(|| format!("failed to export into '{}'", args.out_dir.display()))?;
        println!("{}", sink.path_for(&request.link()).display());

        Ok(())
    }

    fn default_name(input: Option<&Path>) -> String {
        input
            .and_then(Path::file_stem)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "export".into())
    }

    fn is_json(payload: &str) -> bool {
        serde_json::from_str::<serde::de::IgnoredAny>(payload).is_ok()
    }

}
