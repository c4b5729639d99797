//! Customer endpoints: customers, their ADOMs, users and widgets.

use crate::client::FpcClient;
use crate::models::{
    CreateCustomerRequest, CreateCustomerUserRequest, Customer, CustomerAdoms, CustomerSummary,
    CustomerUpdate,
};
use crate::Result;
use fpc_core::ids::{CustomerId, UserId};
use fpc_core::Error;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info};

impl FpcClient {
    /// List all customers.
    pub async fn list_customers(&self) -> Result<Vec<CustomerSummary>> {
        self.get_json("customers").await
    }

    /// Fetch a single customer by id.
    pub async fn get_customer(&self, cid: CustomerId) -> Result<Customer> {
        self.get_json(&format!("customers/{cid}")).await
    }

    /// Look a customer up by exact name.
    ///
    /// Lists customers, then fetches the first one whose name matches.
    /// Returns `Ok(None)` when no customer has that name. Listing entries
    /// without a name or id are skipped.
    pub async fn find_customer_by_name(&self, customer_name: &str) -> Result<Option<Customer>> {
        let customers = self.list_customers().await?;

        match customers.into_iter().find_map(|customer| {
            customer
                .customer_id
                .filter(|_| customer.customer_name.as_deref() == Some(customer_name))
        }) {
            Some(cid) => self.get_customer(cid).await.map(Some),
            None => {
                debug!(customer_name, "no customer with that name");
                Ok(None)
            }
        }
    }

    /// Create a customer.
    pub async fn create_customer(&self, request: &CreateCustomerRequest) -> Result<StatusCode> {
        self.post_status("customers", Some(request)).await
    }

    /// Update a customer.
    ///
    /// This is a read-modify-write: the current customer is fetched first, its
    /// required fields (`customerName`, `contactFname`, `contactLname`,
    /// `contactEmail`, `totalStorage`) seed the body, and every field set on
    /// `update` overrides them. The whole body is then posted back.
    pub async fn update_customer(
        &self,
        cid: CustomerId,
        update: &CustomerUpdate,
    ) -> Result<StatusCode> {
        let current = self.get_customer(cid).await?;
        let body = update.apply_to(&current);

        info!(customer_id = %cid, "updating customer");
        self.post_status(&format!("customers/{cid}"), Some(&body))
            .await
    }

    /// Update a customer found by exact name. See [`update_customer`](Self::update_customer).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no customer has that name.
    pub async fn update_customer_by_name(
        &self,
        customer_name: &str,
        update: &CustomerUpdate,
    ) -> Result<StatusCode> {
        let customer = self
            .find_customer_by_name(customer_name)
            .await?
            .ok_or_else(|| Error::NotFound(format!("customer `{customer_name}`")))?;

        let cid = customer.customer_id.ok_or_else(|| {
            Error::ParseError(format!("customer `{customer_name}` has no customerId"))
        })?;

        let body = update.apply_to(&customer);
        info!(customer_id = %cid, "updating customer");
        self.post_status(&format!("customers/{cid}"), Some(&body))
            .await
    }

    /// Delete a customer.
    pub async fn delete_customer(&self, cid: CustomerId) -> Result<StatusCode> {
        info!(customer_id = %cid, "deleting customer");
        self.post_status::<()>(&format!("customers/{cid}/delete"), None)
            .await
    }

    /// ADOMs assigned to a customer.
    pub async fn get_customer_adoms(&self, cid: CustomerId) -> Result<Value> {
        self.get_json(&format!("customers/{cid}/adoms")).await
    }

    /// Replace the ADOM assignment of `assignment.customer_id`.
    pub async fn set_customer_adoms(&self, assignment: &CustomerAdoms) -> Result<StatusCode> {
        let cid = assignment.customer_id;
        self.post_status(&format!("customers/{cid}/adoms"), Some(assignment))
            .await
    }

    /// Users belonging to a customer.
    pub async fn list_customer_users(&self, cid: CustomerId) -> Result<Value> {
        self.get_json(&format!("customers/{cid}/users")).await
    }

    /// A single customer user.
    pub async fn get_customer_user(&self, cid: CustomerId, uid: UserId) -> Result<Value> {
        self.get_json(&format!("customers/{cid}/users/{uid}")).await
    }

    /// Create a user under a customer.
    pub async fn create_customer_user(
        &self,
        cid: CustomerId,
        request: &CreateCustomerUserRequest,
    ) -> Result<StatusCode> {
        self.post_status(&format!("customers/{cid}/users"), Some(request))
            .await
    }

    /// Dashboard widgets configured for a customer.
    pub async fn get_customer_widgets(&self, cid: CustomerId) -> Result<Value> {
        self.get_json(&format!("customers/{cid}/widgets")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::{logged_in_client, SESSION_ID};
    use crate::models::{
        CreateCustomerRequest, CreateCustomerUserRequest, CustomerAdoms, CustomerUpdate,
    };
    use fpc_core::ids::{AdomAssignmentId, CustomerId, UserId};
    use fpc_core::Error;
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn customer_json(id: u64, name: &str) -> serde_json::Value {
        json!({
            "customerId": id,
            "customerName": name,
            "contactFname": "Ada",
            "contactLname": "Lovelace",
            "contactEmail": "ada@acme.test",
            "totalStorage": 500,
            "city": "London"
        })
    }

    async fn mount_customer_list(server: &MockServer, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path("/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"customerId": 7, "customerName": "Acme"},
                {"customerId": 8, "customerName": "Globex"}
            ])))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn list_customers_success() {
        let server = MockServer::start().await;
        mount_customer_list(&server, 1).await;

        let client = logged_in_client(&server).await;
        let customers = client.list_customers().await.unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[1].customer_id, Some(CustomerId::new(8)));
        assert_eq!(customers[1].customer_name.as_deref(), Some("Globex"));
    }

    #[tokio::test]
    async fn get_customer_sends_session_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers/7"))
            .and(header("fpc-sid", SESSION_ID))
            .respond_with(ResponseTemplate::new(200).set_body_json(customer_json(7, "Acme")))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let customer = client.get_customer(CustomerId::new(7)).await.unwrap();
        assert_eq!(customer.customer_name.as_deref(), Some("Acme"));
        assert_eq!(customer.total_storage, Some(500));
    }

    #[tokio::test]
    async fn find_customer_by_name_fetches_match() {
        let server = MockServer::start().await;
        mount_customer_list(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/customers/8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(customer_json(8, "Globex")))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let customer = client.find_customer_by_name("Globex").await.unwrap().unwrap();
        assert_eq!(customer.customer_id, Some(CustomerId::new(8)));
    }

    #[tokio::test]
    async fn find_customer_by_name_returns_none_without_match() {
        let server = MockServer::start().await;
        mount_customer_list(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/customers/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(customer_json(7, "Acme")))
            .expect(0)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        assert!(client.find_customer_by_name("Initech").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_customer_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/customers"))
            .and(body_json(json!({
                "customerName": "Acme",
                "contactFname": "Ada",
                "contactLname": "Lovelace",
                "contactEmail": "ada@acme.test",
                "totalStorage": 500,
                "address1": "1 Main St",
                "address2": ""
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let request = CreateCustomerRequest::new("Acme", "Ada", "Lovelace", "ada@acme.test", 500)
            .with_address("1 Main St", "");
        let status = client.create_customer(&request).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn update_customer_reads_then_writes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(customer_json(7, "Acme")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/customers/7"))
            .and(body_json(json!({
                "customerName": "Acme",
                "contactFname": "X",
                "contactLname": "Lovelace",
                "contactEmail": "ada@acme.test",
                "totalStorage": 500
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let update = CustomerUpdate {
            contact_fname: Some("X".into()),
            ..CustomerUpdate::default()
        };
        let status = client
            .update_customer(CustomerId::new(7), &update)
            .await
            .unwrap();
        assert_eq!(status, StatusCode::OK);

        let requests = server.received_requests().await.unwrap();
        let methods: Vec<&str> = requests
            .iter()
            .skip(1)
            .map(|request| request.method.as_str())
            .collect();
        assert_eq!(methods, vec!["GET", "POST"]);
    }

    #[tokio::test]
    async fn update_customer_with_null_contact() {
        let server = MockServer::start().await;
        let mut current = customer_json(7, "Acme");
        current["contactLname"] = serde_json::Value::Null;
        Mock::given(method("GET"))
            .and(path("/customers/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/customers/7"))
            .and(body_json(json!({
                "customerName": "Acme",
                "contactFname": "Ada",
                "contactLname": "Lovelace",
                "contactEmail": "ada@acme.test",
                "totalStorage": 500
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let update = CustomerUpdate {
            contact_lname: Some("Lovelace".into()),
            ..CustomerUpdate::default()
        };
        let status = client
            .update_customer(CustomerId::new(7), &update)
            .await
            .unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn find_customer_by_name_skips_unnamed_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"customerId": 8, "customerName": null},
                {"customerName": "Acme"},
                {"customerId": 7, "customerName": "Acme"}
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/customers/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(customer_json(7, "Acme")))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let customer = client.find_customer_by_name("Acme").await.unwrap().unwrap();
        assert_eq!(customer.customer_id, Some(CustomerId::new(7)));
    }

    #[tokio::test]
    async fn update_customer_by_name_unknown_name() {
        let server = MockServer::start().await;
        mount_customer_list(&server, 1).await;

        let client = logged_in_client(&server).await;
        let err = client
            .update_customer_by_name("Initech", &CustomerUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(ref what) if what.contains("Initech")));
    }

    #[tokio::test]
    async fn update_customer_by_name_posts_to_matching_id() {
        let server = MockServer::start().await;
        mount_customer_list(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/customers/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(customer_json(7, "Acme")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/customers/7"))
            .and(body_json(json!({
                "customerName": "Acme",
                "contactFname": "Ada",
                "contactLname": "Lovelace",
                "contactEmail": "ada@acme.test",
                "totalStorage": 750,
                "collectorStoragePercentage": 20
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let update = CustomerUpdate {
            total_storage: Some(750),
            collector_storage_percentage: Some(20),
            ..CustomerUpdate::default()
        };
        client.update_customer_by_name("Acme", &update).await.unwrap();
    }

    #[tokio::test]
    async fn delete_customer_returns_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/customers/7/delete"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let status = client.delete_customer(CustomerId::new(7)).await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn customer_read_endpoints() {
        let server = MockServer::start().await;
        for (route, body) in [
            ("/customers/7/adoms", json!([{"name": "root"}])),
            ("/customers/7/users", json!([{"userName": "ada"}])),
            ("/customers/7/widgets", json!({"widgets": ["alerts"]})),
        ] {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = logged_in_client(&server).await;
        let cid = CustomerId::new(7);
        assert_eq!(client.get_customer_adoms(cid).await.unwrap()[0]["name"], "root");
        assert_eq!(
            client.list_customer_users(cid).await.unwrap()[0]["userName"],
            "ada"
        );
        assert_eq!(
            client.get_customer_widgets(cid).await.unwrap()["widgets"][0],
            "alerts"
        );
    }

    #[tokio::test]
    async fn set_customer_adoms_posts_assignment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/customers/7/adoms"))
            .and(body_json(json!({
                "id": 2,
                "customerId": 7,
                "adoms": [{"name": "root"}]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let assignment = CustomerAdoms {
            id: AdomAssignmentId::new(2),
            customer_id: CustomerId::new(7),
            adoms: vec![json!({"name": "root"})],
        };
        client.set_customer_adoms(&assignment).await.unwrap();
    }

    #[tokio::test]
    async fn customer_users_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers/7/users/3"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"userName": "ada", "id": 3})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/customers/7/users"))
            .and(body_json(json!({
                "userName": "grace",
                "firstName": "Grace",
                "lastName": "Hopper",
                "email": "grace@acme.test",
                "password": "pa55"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let user = client
            .get_customer_user(CustomerId::new(7), UserId::new(3))
            .await
            .unwrap();
        assert_eq!(user["userName"], "ada");

        let request =
            CreateCustomerUserRequest::new("grace", "Grace", "Hopper", "grace@acme.test", "pa55");
        let status = client
            .create_customer_user(CustomerId::new(7), &request)
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn create_customer_user_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/customers/7/users"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let request =
            CreateCustomerUserRequest::new("grace", "Grace", "Hopper", "grace@acme.test", "pa55");
        let err = client
            .create_customer_user(CustomerId::new(7), &request)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ServiceUnavailable(_)));
    }
}
