use chlog::models::*;
use chlog::store::Store;
use speculate2::speculate;

fn create_input(version: &str, product: &str, status: VersionStatus) -> CreateVersionInput {
    CreateVersionInput {
        version: version.to_string(),
        product: product.to_string(),
        title: format!("Release {}", version),
        status: Some(status),
        updates: Vec::new(),
    }
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = Store::open(dir.path()).expect("Failed to open store");
    }

    describe "versions" {
        describe "create_version" {
            it "assigns the id from the version string and defaults to draft" {
                let version = store.create_version(CreateVersionInput {
                    version: "1.2.0".to_string(),
                    product: "IDE".to_string(),
                    title: "Spring release".to_string(),
                    status: None,
                    updates: Vec::new(),
                }).expect("Failed to create version");

                assert_eq!(version.id, "v1.2.0");
                assert_eq!(version.status, VersionStatus::Draft);
                assert_eq!(version.title, "Spring release");
            }

            it "rejects a duplicate version id" {
                store.create_version(create_input("1.0.0", "IDE", VersionStatus::Draft))
                    .expect("Failed to create version");
                let err = store.create_version(create_input("1.0.0", "CLI", VersionStatus::Draft))
                    .unwrap_err();
                assert!(err.to_string().contains("already exists"));
            }

            it "persists structured updates with the version" {
                let updates = chlog::markup::parse("## feature\n- a\n  - b");
                let created = store.create_version(CreateVersionInput {
                    version: "2.0.0".to_string(),
                    product: "CLI".to_string(),
                    title: "Big one".to_string(),
                    status: Some(VersionStatus::Published),
                    updates,
                }).expect("Failed to create version");

                let found = store.version(&created.id).expect("Query failed").unwrap();
                assert_eq!(found.updates.len(), 1);
                assert_eq!(found.updates[0].items[0].text, "a");
                assert_eq!(found.updates[0].items[0].children[0].text, "b");
            }
        }

        describe "published_versions" {
            it "excludes drafts" {
                store.create_version(create_input("1.0.0", "IDE", VersionStatus::Published))
                    .expect("Failed to create");
                store.create_version(create_input("1.1.0", "IDE", VersionStatus::Draft))
                    .expect("Failed to create");

                let versions = store.published_versions(None).expect("Query failed");
                assert_eq!(versions.len(), 1);
                assert_eq!(versions[0].id, "v1.0.0");
            }

            it "filters by product" {
                store.create_version(create_input("1.0.0", "IDE", VersionStatus::Published))
                    .expect("Failed to create");
                store.create_version(create_input("2.0.0", "CLI", VersionStatus::Published))
                    .expect("Failed to create");

                let versions = store.published_versions(Some("CLI")).expect("Query failed");
                assert_eq!(versions.len(), 1);
                assert_eq!(versions[0].product, "CLI");
            }

            it "orders newest publish date first" {
                // Later creations get later publish dates; the most recent
                // must come back first.
                store.create_version(create_input("1.0.0", "IDE", VersionStatus::Published))
                    .expect("Failed to create");
                store.create_version(create_input("1.1.0", "IDE", VersionStatus::Published))
                    .expect("Failed to create");

                let versions = store.published_versions(None).expect("Query failed");
                assert_eq!(versions[0].id, "v1.1.0");
                assert_eq!(versions[1].id, "v1.0.0");
            }
        }

        describe "all_versions" {
            it "includes drafts" {
                store.create_version(create_input("1.0.0", "IDE", VersionStatus::Draft))
                    .expect("Failed to create");
                let versions = store.all_versions().expect("Query failed");
                assert_eq!(versions.len(), 1);
            }
        }

        describe "update_version" {
            it "applies partial updates" {
                store.create_version(create_input("1.0.0", "IDE", VersionStatus::Draft))
                    .expect("Failed to create");

                let updated = store.update_version("v1.0.0", UpdateVersionInput {
                    version: None,
                    product: None,
                    title: Some("Renamed".to_string()),
                    status: Some(VersionStatus::Published),
                    updates: None,
                }).expect("Update failed").unwrap();

                assert_eq!(updated.title, "Renamed");
                assert_eq!(updated.status, VersionStatus::Published);
                assert_eq!(updated.product, "IDE");
            }

            it "returns None for a missing version" {
                let result = store.update_version("v9.9.9", UpdateVersionInput {
                    version: None,
                    product: None,
                    title: None,
                    status: None,
                    updates: None,
                }).expect("Update failed");
                assert!(result.is_none());
            }
        }

        describe "delete_version" {
            it "removes the version" {
                store.create_version(create_input("1.0.0", "IDE", VersionStatus::Draft))
                    .expect("Failed to create");
                assert!(store.delete_version("v1.0.0").expect("Delete failed"));
                assert!(store.version("v1.0.0").expect("Query failed").is_none());
            }

            it "returns false for a missing version" {
                assert!(!store.delete_version("v1.0.0").expect("Delete failed"));
            }
        }

        describe "latest_version" {
            it "suggests 1.0.0 for a product with no versions" {
                let latest = store.latest_version("IDE").expect("Query failed");
                assert!(latest.latest_version.is_none());
                assert_eq!(latest.suggested_version, "1.0.0");
            }

            it "compares versions numerically, not lexically" {
                store.create_version(create_input("1.2.0", "IDE", VersionStatus::Published))
                    .expect("Failed to create");
                store.create_version(create_input("1.10.0", "IDE", VersionStatus::Draft))
                    .expect("Failed to create");

                let latest = store.latest_version("IDE").expect("Query failed");
                assert_eq!(latest.latest_version.as_deref(), Some("1.10.0"));
                assert_eq!(latest.suggested_version, "1.10.1");
            }

            it "ignores other products" {
                store.create_version(create_input("5.0.0", "CLI", VersionStatus::Published))
                    .expect("Failed to create");
                let latest = store.latest_version("IDE").expect("Query failed");
                assert_eq!(latest.suggested_version, "1.0.0");
            }
        }
    }

    describe "config" {
        it "returns defaults when no config file exists" {
            let config = store.config().expect("Config read failed");
            assert_eq!(config.site.title, "Changelog");
            assert!(config.admin.is_none());
            assert!(!config.products.is_empty());
        }

        it "round-trips a saved config" {
            let mut config = AppConfig::default();
            config.site.title = "My Changelog".to_string();
            config.admin = Some(AdminConfig {
                username: "admin".to_string(),
                password: "hunter2".to_string(),
            });
            store.save_config(&config).expect("Save failed");

            let loaded = store.config().expect("Config read failed");
            assert_eq!(loaded.site.title, "My Changelog");
            assert_eq!(loaded.admin.unwrap().username, "admin");
        }

        it "validates product tags against the enabled product list" {
            let config = AppConfig::default();
            assert!(config.is_valid_product("IDE"));
            assert!(!config.is_valid_product("Toaster"));
        }

        it "accepts any product tag when the product list is empty" {
            let mut config = AppConfig::default();
            config.products.clear();
            assert!(config.is_valid_product("anything"));
        }
    }

    describe "backup" {
        it "copies the changelog file into the backups directory" {
            store.create_version(create_input("1.0.0", "IDE", VersionStatus::Published))
                .expect("Failed to create");

            let path = store.backup().expect("Backup failed");
            assert!(path.exists());
            let content = std::fs::read_to_string(&path).expect("Read failed");
            assert!(content.contains("v1.0.0"));
        }
    }

    describe "uploads" {
        it "stores a file and lists it with a public url" {
            let entry = store.save_upload("screenshot.PNG", b"fake png bytes")
                .expect("Upload failed");
            assert!(entry.filename.ends_with(".png"));
            assert_eq!(entry.url, format!("/uploads/{}", entry.filename));

            let listed = store.list_uploads().expect("List failed");
            assert_eq!(listed.len(), 1);
            assert_eq!(listed[0].filename, entry.filename);
        }

        it "lists only image files" {
            store.save_upload("clip.mp4", b"fake video").expect("Upload failed");
            store.save_upload("pic.webp", b"fake image").expect("Upload failed");

            let listed = store.list_uploads().expect("List failed");
            assert_eq!(listed.len(), 1);
            assert!(listed[0].filename.ends_with(".webp"));
        }

        it "generates distinct filenames for identical uploads" {
            let a = store.save_upload("a.png", b"same").expect("Upload failed");
            let b = store.save_upload("a.png", b"same").expect("Upload failed");
            assert_ne!(a.filename, b.filename);
        }
    }
}
