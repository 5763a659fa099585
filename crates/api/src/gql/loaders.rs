use async_graphql::dataloader::Loader;
use infra::{db::Db, models::ClientRow};
use std::{collections::HashMap, future::Future, sync::Arc};
use uuid::Uuid;

// ClientLoader - batch load clients by ID for `Order.client`
#[derive(Clone)]
pub struct ClientLoader {
    pool: Db,
}

impl ClientLoader {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

impl Loader<Uuid> for ClientLoader {
    type Value = ClientRow;
    type Error = Arc<sqlx::Error>;

    fn load(
        &self,
        keys: &[Uuid],
    ) -> impl Future<Output = std::result::Result<HashMap<Uuid, Self::Value>, Self::Error>> + Send
    {
        let pool = self.pool.clone();
        let ids: Vec<Uuid> = keys.to_vec();

        async move {
            if ids.is_empty() {
                return Ok(HashMap::new());
            }

            let rows: Vec<ClientRow> = sqlx::query_as::<_, ClientRow>(
                r#"
                SELECT id, first_name, last_name, company, email, telephone,
                       seller_id, created_at, updated_at
                FROM clients
                WHERE id = ANY($1::uuid[])
                "#,
            )
            .bind(&ids)
            .fetch_all(&pool)
            .await
            .map_err(Arc::new)?;

            Ok(rows.into_iter().map(|r| (r.id, r)).collect())
        }
    }
}
