use super::Manifest;

const EXAMPLE: &str = include_str!("example.toml");

impl Manifest {
    /// Render the example stack with the given name.
    ///
    /// The example declares an API, a credentials secret, a network and a
    /// serverless database cluster, one `rds` data source and a query and
    /// mutation resolver.
    pub fn example(name: &str) -> String {
        let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
        EXAMPLE.replace("{{name}}", &escaped)
    }
}
