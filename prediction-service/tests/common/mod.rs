use prediction_service::config::{ModelConfig, PredictionConfig, TelemetryConfig};
use prediction_service::startup::Application;
use service_core::config::Config as CoreConfig;

pub struct TestApp {
    pub http_address: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_model(ModelConfig::default()).await
    }

    pub async fn spawn_with_model(model: ModelConfig) -> Self {
        let config = PredictionConfig {
            common: CoreConfig { port: 0 }, // Random port for testing
            model,
            telemetry: TelemetryConfig {
                log_level: "warn".to_string(),
                otlp_endpoint: None,
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let http_port = app.port();
        let http_address = format!("http://127.0.0.1:{}", http_port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", http_address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { http_address }
    }

    pub async fn post_predict(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/predict", self.http_address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
