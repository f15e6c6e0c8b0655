use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    routes::{default_route, enrich_route},
    services::ExaClient,
};

pub fn run(listener: TcpListener, exa_client: ExaClient) -> Result<Server, std::io::Error> {
    let exa_client = web::Data::new(exa_client);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(web::scope("/api").service(enrich_route::enrich))
            .app_data(exa_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
