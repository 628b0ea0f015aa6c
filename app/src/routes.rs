use web::Router;

use crate::bootstrap::AppState;
use crate::controllers::substation;

pub fn register() -> Router<AppState> {
    Router::new()
        .get("/", substation::index)
        .get("/create", substation::create)
        .post("/create", substation::store)
        .get("/{id}/edit", substation::edit)
        .post("/{id}/edit", substation::update)
        .post("/{id}/delete", substation::destroy)
}
