//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

/// Provision a fresh member account through the admin API
async fn create_member(server: &TestServer, credits: Option<i64>) -> CreatedUserBody {
    let response = server
        .post_keyed(
            "/api/v1/users",
            &server.admin_key,
            &CreateUserBody::unique_member(),
        )
        .await
        .unwrap();
    let user: CreatedUserBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    if let Some(credits) = credits {
        let response = server
            .patch_keyed(
                &format!("/api/v1/users/{}/credits", user.id),
                &server.admin_key,
                &UpdateCreditsBody { credits },
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    user
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_missing_api_key() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/users/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_invalid_api_key() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get_keyed("/api/v1/users/me", "not-a-real-key")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_member_cannot_use_admin_endpoints() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = create_member(&server, None).await;

    let response = server
        .get_keyed("/api/v1/audit", &member.api_key)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_create_user_returns_api_key_once() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = create_member(&server, None).await;

    assert_eq!(member.api_key.len(), 64);
    assert_eq!(member.role, "member");
    assert_eq!(member.credits, 100);

    // The profile endpoint never exposes the key
    let response = server
        .get_keyed("/api/v1/users/me", &member.api_key)
        .await
        .unwrap();
    let body = response.text().await.unwrap();
    assert!(!body.contains(&member.api_key));
}

#[tokio::test]
async fn test_duplicate_username_conflict() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUserBody::unique_member();

    let response = server
        .post_keyed("/api/v1/users", &server.admin_key, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_keyed("/api/v1/users", &server.admin_key, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_user_stats_reflect_submissions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = create_member(&server, Some(10)).await;

    let response = server
        .post_keyed(
            "/api/v1/commands",
            &member.api_key,
            &SubmitCommandBody::new("pwd"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_keyed("/api/v1/users/me/stats", &member.api_key)
        .await
        .unwrap();
    let stats: UserStatsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.credits, 9);
    assert_eq!(stats.total_commands, 1);
    assert_eq!(stats.executed_commands, 1);
}

// ============================================================================
// Command Tests
// ============================================================================

#[tokio::test]
async fn test_safe_command_executes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = create_member(&server, Some(5)).await;

    let response = server
        .post_keyed(
            "/api/v1/commands",
            &member.api_key,
            &SubmitCommandBody::new("ls -la"),
        )
        .await
        .unwrap();
    let command: CommandBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(command.status, "executed");
    assert_eq!(command.credits_deducted, 1);
    assert!(command.result.unwrap().contains("[MOCK]"));
}

#[tokio::test]
async fn test_dangerous_command_rejected_by_seeded_rule() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = create_member(&server, Some(5)).await;

    let response = server
        .post_keyed(
            "/api/v1/commands",
            &member.api_key,
            &SubmitCommandBody::new("rm -rf /"),
        )
        .await
        .unwrap();
    let command: CommandBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(command.status, "rejected");
    assert_eq!(command.credits_deducted, 0);
    assert!(command.rule_id.is_some());
}

#[tokio::test]
async fn test_malformed_command_recorded_as_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = create_member(&server, Some(5)).await;

    let response = server
        .post_keyed(
            "/api/v1/commands",
            &member.api_key,
            &SubmitCommandBody::new("ls ;; pwd"),
        )
        .await
        .unwrap();
    let command: CommandBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(command.status, "rejected");
    assert!(command.result.unwrap().starts_with("Invalid command:"));
}

#[tokio::test]
async fn test_exhausted_credits_payment_required() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = create_member(&server, Some(0)).await;

    let response = server
        .post_keyed(
            "/api/v1/commands",
            &member.api_key,
            &SubmitCommandBody::new("ls"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::PAYMENT_REQUIRED)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_command_history_is_private() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = create_member(&server, Some(5)).await;
    let bob = create_member(&server, Some(5)).await;

    let response = server
        .post_keyed(
            "/api/v1/commands",
            &alice.api_key,
            &SubmitCommandBody::new("whoami"),
        )
        .await
        .unwrap();
    let command: CommandBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_keyed(&format!("/api/v1/commands/{}", command.id), &bob.api_key)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Admins included; the audit trail is their window into activity
    let response = server
        .get_keyed(&format!("/api/v1/commands/{}", command.id), &server.admin_key)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Rule Tests
// ============================================================================

#[tokio::test]
async fn test_rule_crud() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_keyed(
            "/api/v1/rules",
            &server.admin_key,
            &CreateRuleBody {
                pattern: format!("^testcmd{}", unique_suffix()),
                action: "AUTO_ACCEPT".to_string(),
                description: Some("test rule".to_string()),
                priority: 42,
            },
        )
        .await
        .unwrap();
    let rule: RuleBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(rule.priority, 42);

    let response = server
        .get_keyed(&format!("/api/v1/rules/{}", rule.id), &server.admin_key)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .delete_keyed(&format!("/api/v1/rules/{}", rule.id), &server.admin_key)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_keyed(&format!("/api/v1/rules/{}", rule.id), &server.admin_key)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_invalid_pattern_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_keyed(
            "/api/v1/rules",
            &server.admin_key,
            &CreateRuleBody {
                pattern: "([unclosed".to_string(),
                action: "AUTO_REJECT".to_string(),
                description: None,
                priority: 0,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Approval Workflow Tests
// ============================================================================

#[tokio::test]
async fn test_approval_round_trip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = create_member(&server, Some(5)).await;

    // A rule that parks a unique command text for review
    let marker = format!("deploytool{}", unique_suffix());
    let response = server
        .post_keyed(
            "/api/v1/rules",
            &server.admin_key,
            &CreateRuleBody {
                pattern: format!("^{marker}"),
                action: "REQUIRE_APPROVAL".to_string(),
                description: None,
                priority: 0,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_keyed(
            "/api/v1/commands",
            &member.api_key,
            &SubmitCommandBody::new(&format!("{marker} release")),
        )
        .await
        .unwrap();
    let command: CommandBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(command.status, "pending_approval");

    // Find the pending request in the admin queue
    let response = server
        .get_keyed("/api/v1/approvals?limit=500", &server.admin_key)
        .await
        .unwrap();
    let queue: Vec<ApprovalBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let entry = queue
        .iter()
        .find(|a| a.command_id == command.id)
        .expect("pending request not in queue");

    let response = server
        .post_keyed(
            &format!("/api/v1/approvals/{}/review", entry.id),
            &server.admin_key,
            &ReviewBody {
                action: "approve".to_string(),
                reason: None,
            },
        )
        .await
        .unwrap();
    let outcome: ReviewOutcomeBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(outcome.status, "executed");

    // Second review of the same request is gone
    let response = server
        .post_keyed(
            &format!("/api/v1/approvals/{}/review", entry.id),
            &server.admin_key,
            &ReviewBody {
                action: "reject".to_string(),
                reason: Some("changed my mind".to_string()),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Audit Tests
// ============================================================================

#[tokio::test]
async fn test_audit_trail_records_executions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = create_member(&server, Some(5)).await;

    let response = server
        .post_keyed(
            "/api/v1/commands",
            &member.api_key,
            &SubmitCommandBody::new("uptime"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_keyed(
            &format!("/api/v1/audit/user/{}", member.id),
            &server.admin_key,
        )
        .await
        .unwrap();
    let entries: Vec<AuditEntryBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(entries.iter().any(|e| e.action == "COMMAND_EXECUTED"));
}

#[tokio::test]
async fn test_audit_unknown_user_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get_keyed("/api/v1/audit/user/1", &server.admin_key)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
