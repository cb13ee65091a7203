//src/bin/painel.rs
// Painel de console: conecta na API, sincroniza tudo e imprime o resumo.

use clap::Parser;
use std::{
    process::ExitCode,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use nm_producao::{
    client::{
        install_failure_net, ApiClient, ChartRenderer, ClientConfig, ConnectionStatus, Connector, NoopChart,
        NoticeKind, Presenter, ViewUpdate,
    },
    common::logging::init_tracing,
    config::LogFormat,
};

const BAR_WIDTH: f64 = 40.0;

#[derive(Debug, Parser)]
#[command(name = "painel", about = "Painel de produção e descarte (console)")]
struct Args {
    /// Host da API
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Porta da API
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Tempo limite de cada chamada, em segundos
    #[arg(long, default_value_t = 8)]
    timeout_secs: u64,

    /// Não desenha gráficos
    #[arg(long)]
    no_charts: bool,
}

/// Só imprime quando o estado de carregamento muda.
#[derive(Default)]
struct ConsolePresenter {
    loading: AtomicBool,
}

impl Presenter for ConsolePresenter {
    fn show_loading(&self, visible: bool) {
        let was = self.loading.swap(visible, Ordering::SeqCst);
        if visible && !was {
            eprintln!("⏳ Carregando...");
        }
    }

    fn set_status(&self, status: ConnectionStatus) {
        let label = match status {
            ConnectionStatus::Connecting => "🟡 Conectando",
            ConnectionStatus::Connected => "🟢 Conectado",
            ConnectionStatus::Disconnected => "🔴 Desconectado",
        };
        eprintln!("{}", label);
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        let icon = match kind {
            NoticeKind::Success => "✅",
            NoticeKind::Warning => "⚠️",
            NoticeKind::Error => "❌",
        };
        println!("{} {}", icon, message);
    }

    fn apply(&self, update: ViewUpdate) {
        match update {
            ViewUpdate::Dashboard(stats) => {
                println!("\n== Dashboard ==");
                println!("Produtos cadastrados : {}", stats.total_produtos);
                println!("Produção total (m³)  : {:.4}", stats.total_producao_m3);
                println!("Descarte (chapas)    : {}", stats.total_descarte_chapas);
                println!("Eficiência           : {:.2}%", stats.eficiencia);
            }
            ViewUpdate::Products(page) => {
                println!("\n== Produtos ({} no total) ==", page.total);
                for p in &page.rows {
                    println!(
                        "{:>5}  {:<10} {:<30} {:.4} m³",
                        p.produtoid,
                        p.codigo,
                        p.descricao,
                        p.cubagem_m3.unwrap_or_default()
                    );
                }
            }
            ViewUpdate::Shifts(rows) => {
                let names: Vec<&str> = rows.iter().map(|s| s.turnonome.as_str()).collect();
                println!("\nTurnos: {}", names.join(", "));
            }
            ViewUpdate::Sectors(rows) => {
                let names: Vec<&str> = rows.iter().map(|s| s.setornome.as_str()).collect();
                println!("\nSetores: {}", names.join(", "));
            }
            ViewUpdate::RecentProduction(page) => {
                println!("\n== Últimas produções ({} no total) ==", page.total);
                for r in &page.rows {
                    println!(
                        "{}  {:<10} {:<12} {:>5} chapas  {:.4} m³",
                        r.data,
                        r.codigo.as_deref().unwrap_or("-"),
                        r.turnonome.as_deref().unwrap_or("-"),
                        r.quantidade_chapas,
                        r.cubagem_m3.unwrap_or_default()
                    );
                }
            }
        }
    }
}

/// Barras em ASCII proporcionais ao maior valor.
struct TextChart;

impl TextChart {
    fn render(title: &str, labels: &[String], values: &[f64]) {
        println!("\n-- {} --", title);
        let max = values.iter().cloned().fold(0.0_f64, f64::max);
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        for (label, value) in labels.iter().zip(values) {
            let len = if max > 0.0 { (value / max * BAR_WIDTH).round() as usize } else { 0 };
            println!("{:<width$} | {} {:.4}", label, "#".repeat(len), value, width = width);
        }
    }
}

impl ChartRenderer for TextChart {
    fn available(&self) -> bool {
        true
    }

    fn bar(&self, title: &str, labels: &[String], values: &[f64]) {
        Self::render(title, labels, values);
    }

    fn line(&self, title: &str, labels: &[String], values: &[f64]) {
        Self::render(title, labels, values);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(LogFormat::Compact);

    let presenter: Arc<dyn Presenter> = Arc::new(ConsolePresenter::default());
    install_failure_net(Arc::clone(&presenter));

    let config = ClientConfig::from_host_port(&args.host, args.port)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let client = match ApiClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Não foi possível criar o cliente HTTP: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let chart: Arc<dyn ChartRenderer> = if args.no_charts {
        Arc::new(NoopChart)
    } else {
        Arc::new(TextChart)
    };

    let report = Connector::new(client, presenter, chart).connect().await;
    if !report.connected {
        return ExitCode::FAILURE;
    }

    for task in report.sync.tasks.iter().filter(|t| !t.outcome.is_success()) {
        eprintln!("⚠️  {} não sincronizou: {:?}", task.name, task.outcome);
    }
    ExitCode::SUCCESS
}
