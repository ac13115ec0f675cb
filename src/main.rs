use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use smart_mobility_backend::config::database::DatabaseConfig;
use smart_mobility_backend::config::environment::{AuthStrategyKind, EnvironmentConfig};
use smart_mobility_backend::create_app;
use smart_mobility_backend::middleware::auth::{AuthStrategy, BearerAuth, SessionAuth};
use smart_mobility_backend::services::session_service::SessionStore;
use smart_mobility_backend::state::AppState;
use smart_mobility_backend::utils::jwt::JwtConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚀 Smart Mobility Backend");
    info!("=========================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match DatabaseConfig::default().create_pool().await {
        Ok(pool) => {
            info!("📦 PostgreSQL conectado");
            pool
        }
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Estrategia de autenticación según configuración de despliegue
    let auth: Arc<dyn AuthStrategy> = match config.auth_strategy {
        AuthStrategyKind::Bearer => {
            info!("🔐 Autenticación: bearer token (JWT)");
            Arc::new(BearerAuth::new(JwtConfig::from(&config)))
        }
        AuthStrategyKind::Session => {
            info!("🔐 Autenticación: sesión con cookie (Redis)");
            let store = match SessionStore::new(&config.redis_url).await {
                Ok(store) => store,
                Err(e) => {
                    error!("❌ Error conectando a Redis: {}", e);
                    return Err(anyhow::anyhow!("Error de Redis: {}", e));
                }
            };
            Arc::new(SessionAuth::new(store))
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let state = AppState::new(pool, config, auth);
    let app = create_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  / - Bienvenida");
    info!("   GET  /api/health - Health check");
    info!("🔐 Endpoints - Auth:");
    info!("   POST /api/auth/register - Registro local");
    info!("   POST /api/auth/login - Login con email y contraseña");
    info!("   POST /api/auth/google - Login con ID token de Google");
    info!("   GET  /api/auth/verify - Verificar credencial");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("   POST /api/auth/logout - Cerrar sesión");
    info!("👤 Endpoints - Users:");
    info!("   GET  /api/users/profile - Perfil con rutas activas");
    info!("   PUT  /api/users/profile - Actualizar perfil");
    info!("   GET  /api/users/stats - Estadísticas de uso");
    info!("🗺️ Endpoints - Routes:");
    info!("   GET    /api/routes/frequent - Listar rutas frecuentes");
    info!("   POST   /api/routes/frequent - Guardar o reutilizar ruta");
    info!("   POST   /api/routes/frequent/:id/use - Registrar uso de ruta");
    info!("   DELETE /api/routes/frequent/:id - Eliminar ruta (soft delete)");
    info!("   GET    /api/routes/history - Historial paginado");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
