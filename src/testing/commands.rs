//! Canonical test run commands and per-family variants

use super::TestType;
use std::collections::BTreeMap;

/// Placeholder emitted for an unrecognized test type; never an error.
const PLACEHOLDER_COMMAND: &str = "echo 'no recognized test framework'";

/// Canonical run command for a test framework.
pub fn base_command(test_type: TestType) -> &'static str {
    match test_type {
        TestType::Pytest
        | TestType::FastApi
        | TestType::Flask
        | TestType::Starlette => "pytest",
        TestType::Unittest => "python -m unittest",
        TestType::Nose => "nosetests",
        TestType::Django => "python manage.py test",

        TestType::Jest => "npx jest",
        TestType::Mocha => "npx mocha",
        TestType::Jasmine => "npx jasmine",
        TestType::Cypress => "npx cypress run",
        TestType::Playwright => "npx playwright test",
        TestType::Vitest => "npx vitest run",

        TestType::Junit | TestType::Testng => "mvn test",
        TestType::Spock => "./gradlew test",

        TestType::GoTest | TestType::GoCheck | TestType::Testify => "go test ./...",

        TestType::GoogleTest => "ctest",
        TestType::Catch2 => "ctest",
        TestType::BoostTest => "ctest",
        TestType::CppUnit => "ctest",

        TestType::Nunit | TestType::Xunit | TestType::Mstest => "dotnet test",

        TestType::Phpunit => "./vendor/bin/phpunit",

        TestType::Rspec => "bundle exec rspec",
        TestType::Minitest => "bundle exec rake test",

        TestType::Unknown => PLACEHOLDER_COMMAND,
    }
}

/// Command variants for a test framework: always `all`, `verbose`, and
/// `specific_file`, plus family-specific extras (coverage, watch mode,
/// marker filters, single-test selection).
pub fn command_variants(test_type: TestType) -> BTreeMap<String, String> {
    let base = base_command(test_type);
    let mut commands = BTreeMap::new();
    commands.insert("all".to_string(), base.to_string());
    commands.insert("verbose".to_string(), format!("{base} -v"));
    commands.insert("specific_file".to_string(), format!("{base} <test_file>"));

    match test_type {
        TestType::Pytest | TestType::FastApi | TestType::Flask | TestType::Starlette => {
            commands.insert("coverage".to_string(), "pytest --cov=.".to_string());
            commands.insert("markers".to_string(), "pytest -m <marker>".to_string());
            commands.insert("failed_only".to_string(), "pytest --lf".to_string());
        }
        TestType::Jest => {
            commands.insert("coverage".to_string(), "npx jest --coverage".to_string());
            commands.insert("watch".to_string(), "npx jest --watch".to_string());
        }
        TestType::Vitest => {
            commands.insert(
                "coverage".to_string(),
                "npx vitest run --coverage".to_string(),
            );
            commands.insert("watch".to_string(), "npx vitest".to_string());
        }
        TestType::GoTest | TestType::GoCheck | TestType::Testify => {
            commands.insert("verbose".to_string(), "go test -v ./...".to_string());
            commands.insert("coverage".to_string(), "go test -cover ./...".to_string());
            commands.insert(
                "specific_package".to_string(),
                "go test ./<package>".to_string(),
            );
        }
        TestType::Junit | TestType::Testng => {
            commands.insert("maven".to_string(), "mvn test".to_string());
            commands.insert("gradle".to_string(), "./gradlew test".to_string());
            commands.insert(
                "specific_test".to_string(),
                "mvn test -Dtest=<TestClass>".to_string(),
            );
        }
        TestType::Rspec => {
            commands.insert(
                "specific_file".to_string(),
                "bundle exec rspec <spec_file>".to_string(),
            );
        }
        _ => {}
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_commands() {
        assert_eq!(base_command(TestType::Pytest), "pytest");
        assert_eq!(base_command(TestType::Jest), "npx jest");
        assert_eq!(base_command(TestType::GoTest), "go test ./...");
        assert_eq!(base_command(TestType::Phpunit), "./vendor/bin/phpunit");
        assert_eq!(base_command(TestType::Unknown), PLACEHOLDER_COMMAND);
    }

    #[test]
    fn test_common_variants_always_present() {
        for test_type in [
            TestType::Pytest,
            TestType::Jest,
            TestType::Junit,
            TestType::GoTest,
            TestType::Rspec,
            TestType::Unknown,
        ] {
            let variants = command_variants(test_type);
            assert!(variants.contains_key("all"));
            assert!(variants.contains_key("verbose"));
            assert!(variants.contains_key("specific_file"));
        }
    }

    #[test]
    fn test_pytest_family_extras() {
        let variants = command_variants(TestType::Pytest);
        assert_eq!(variants["coverage"], "pytest --cov=.");
        assert_eq!(variants["failed_only"], "pytest --lf");
        assert_eq!(variants["markers"], "pytest -m <marker>");
    }

    #[test]
    fn test_go_verbose_override() {
        let variants = command_variants(TestType::GoTest);
        assert_eq!(variants["verbose"], "go test -v ./...");
    }
}
