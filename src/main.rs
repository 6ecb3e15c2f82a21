use agency_site::adapters::notifier_from_config;
use agency_site::config::{CliConfig, Command};
use agency_site::domain::model::{CaseStudy, ContactForm, Service};
use agency_site::utils::{logger, validation::Validate};
use agency_site::{ContactHandler, ContentRepository, Result, SiteConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => match SiteConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => SiteConfig::default(),
    };

    // 初始化日誌
    if config.logging.json {
        logger::init_server_logger(&config.logging.level);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI args: {:?}", cli);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if let Err(e) = run(&cli, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?})",
            e,
            e.category()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        for field_error in e.field_errors() {
            eprintln!("   • {}", field_error);
        }
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(cli: &CliConfig, config: &SiteConfig) -> Result<()> {
    let content = ContentRepository::from_files(
        config.services_path().as_deref(),
        config.case_studies_path().as_deref(),
    )?;

    match &cli.command {
        Command::Services { slug: Some(slug) } => {
            let service = content.service_by_slug(slug)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(service)?);
            } else {
                print_service(service);
            }
        }
        Command::Services { slug: None } => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(content.all_services())?);
            } else {
                for service in content.all_services() {
                    println!("{:<12} {} | {}", service.slug, service.title, service.summary);
                }
            }
        }
        Command::CaseStudies { slug: Some(slug) } => {
            let case_study = content.case_study_by_slug(slug)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(case_study)?);
            } else {
                print_case_study(case_study);
            }
        }
        Command::CaseStudies { slug: None } => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(content.all_case_studies())?);
            } else {
                for case_study in content.all_case_studies() {
                    println!(
                        "{:<20} {} ({}, {}) | {}",
                        case_study.slug,
                        case_study.title,
                        case_study.sector,
                        case_study.year,
                        case_study.summary
                    );
                }
            }
        }
        Command::Contact(args) => {
            let handler = ContactHandler::new(notifier_from_config(&config.contact)?);
            let form = ContactForm::from(args.clone());

            if cli.json {
                let response = handler.submit(form).await;
                println!("{}", serde_json::to_string_pretty(&response)?);
                if let Some(category) = response.error_category() {
                    std::process::exit(category.exit_code());
                }
            } else {
                handler.process(form).await?;
                println!("✅ {}", agency_site::core::contact::SUCCESS_MESSAGE);
            }
        }
        Command::Serve => serve_http(content, config).await?,
        Command::CheckConfig => {
            // 確認通知器也能建立
            let notifier = notifier_from_config(&config.contact)?;
            println!("✅ Configuration is valid");
            println!("   Site:          {} ({})", config.site.name, config.site.base_url);
            println!("   Services:      {}", content.all_services().len());
            println!("   Case studies:  {}", content.all_case_studies().len());
            println!("   Notifier:      {}", notifier.name());
            println!("   Server:        {}", config.server.bind_address());
        }
    }

    Ok(())
}

#[cfg(feature = "server")]
async fn serve_http(content: ContentRepository, config: &SiteConfig) -> Result<()> {
    use agency_site::adapters::http::{serve, AppState};

    let handler = ContactHandler::new(notifier_from_config(&config.contact)?);
    tracing::info!(
        "📨 Contact submissions go to the {} notifier",
        handler.notifier_name()
    );
    serve(&config.server.bind_address(), AppState::new(content, handler)).await
}

#[cfg(not(feature = "server"))]
async fn serve_http(_content: ContentRepository, _config: &SiteConfig) -> Result<()> {
    Err(agency_site::SiteError::ConfigValidationError {
        field: "features".to_string(),
        message: "built without the `server` feature".to_string(),
    })
}

fn print_service(service: &Service) {
    println!("{}", service.title);
    println!("{}\n", service.summary);
    println!("{}\n", service.description);
    println!("Benefits:");
    for benefit in &service.benefits {
        println!("  • {}", benefit);
    }
    println!("Deliverables:");
    for deliverable in &service.deliverables {
        println!("  • {}", deliverable);
    }
    if !service.faq.is_empty() {
        println!("FAQ:");
        for faq in &service.faq {
            println!("  Q: {}", faq.question);
            println!("  A: {}", faq.answer);
        }
    }
    println!("\n{} {}", service.cta.title, service.cta.description);
}

fn print_case_study(case_study: &CaseStudy) {
    println!("{} ({}, {})", case_study.title, case_study.client, case_study.year);
    println!("Sector: {}\n", case_study.sector);
    println!("Problem: {}\n", case_study.problem);
    println!("Approach: {}\n", case_study.approach);
    println!("Results:");
    for result in &case_study.results {
        println!("  • {}", result);
    }
    println!("Metrics:");
    for metric in &case_study.metrics {
        println!("  {:<20} {:>8} ({})", metric.label, metric.value, metric.improvement);
    }
    println!("Tech: {}", case_study.tech.join(", "));
    println!(
        "\n\"{}\"\n  {}, {} at {}",
        case_study.testimonial.quote,
        case_study.testimonial.author_name,
        case_study.testimonial.author_role,
        case_study.testimonial.company
    );
}
