use crate::domain::model::{MalformedPolicy, SourceLine, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    /// Destination path; `"-"` means standard output.
    fn output_path(&self) -> &str;
    fn scale(&self) -> f64;
    /// Substring that classifies a line as rectangle-like.
    fn marker(&self) -> &str;
    fn on_malformed(&self) -> MalformedPolicy;
    fn report_path(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SourceLine>>;
    async fn transform(&self, lines: Vec<SourceLine>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
