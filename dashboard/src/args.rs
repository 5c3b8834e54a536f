const DEFAULT_SERVER: &str = "http://localhost:5000";

pub struct Args {
    pub server: String,
    pub city_file: Option<String>,
}

impl Args {
    pub fn new(args: Vec<String>) -> Args {
        Args {
            server: args
                .get(1)
                .cloned()
                .unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            city_file: args.get(2).cloned(),
        }
    }
}
