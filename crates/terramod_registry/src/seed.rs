//! Built-in module catalog.
//!
//! Seeding goes through the same public registration path as user modules.
//! A name that already exists is skipped (idempotent re-seeding), but a
//! template that fails validation surfaces as an error instead of being
//! swallowed.

use tracing::{debug, info};

use terramod_core::{
    Provider, TerraformExample, TerraformOutput, TerraformVariable, VariableType,
};

use crate::error::{RegistryError, RegistryResult};
use crate::registry::{NewModule, TerraformRegistry};

/// Register every built-in module that is not already present.
/// Returns the number of modules actually seeded.
pub async fn seed_builtin_modules(registry: &TerraformRegistry) -> RegistryResult<usize> {
    let mut seeded = 0;
    for spec in builtin_modules() {
        let name = spec.name.clone();
        match registry.register_module(spec).await {
            Ok(_) => {
                seeded += 1;
                debug!(module = %name, "Seeded builtin module");
            }
            Err(RegistryError::DuplicateName(_)) => {
                debug!(module = %name, "Builtin module already present, skipping");
            }
            Err(e) => return Err(e),
        }
    }
    if seeded > 0 {
        info!(count = seeded, "Seeded builtin modules");
    }
    Ok(seeded)
}

/// The full built-in catalog, in registration order.
pub fn builtin_modules() -> Vec<NewModule> {
    vec![
        aws_ec2_instance(),
        aws_s3_bucket(),
        aws_rds_instance(),
        aws_vpc(),
        gcp_gce_instance(),
        gcp_gcs_bucket(),
        kubernetes_deployment(),
        kubernetes_service(),
    ]
}

fn aws_ec2_instance() -> NewModule {
    NewModule::new(
        "aws_ec2_instance",
        Provider::Aws,
        "aws_instance",
        r#"resource "aws_instance" "${var.name}" {
  ami           = "${var.ami_id}"
  instance_type = "${var.instance_type}"
  subnet_id     = "${var.subnet_id}"
  key_name      = "${var.key_name}"

  tags = {
    Name        = "${var.name}"
    Environment = "${var.environment}"
    ManagedBy   = "terraform"
  }

  root_block_device {
    volume_size           = ${var.root_volume_size}
    volume_type           = "gp3"
    delete_on_termination = true
    encrypted             = true
  }

  lifecycle {
    ignore_changes = [ami]
  }
}
"#,
    )
    .with_version("2.1.0")
    .with_description("Provision an EC2 instance with configurable size, AMI, and networking.")
    .with_variables(vec![
        TerraformVariable::new("name", VariableType::String, "Instance name tag"),
        TerraformVariable::new("ami_id", VariableType::String, "AMI ID"),
        TerraformVariable::new("instance_type", VariableType::String, "EC2 instance type")
            .with_default("t3.micro")
            .optional(),
        TerraformVariable::new("subnet_id", VariableType::String, "Subnet ID"),
        TerraformVariable::new("key_name", VariableType::String, "SSH key pair name")
            .with_default("")
            .optional(),
        TerraformVariable::new("environment", VariableType::String, "Deployment environment")
            .with_default("dev")
            .optional(),
        TerraformVariable::new("root_volume_size", VariableType::Number, "Root EBS size (GB)")
            .with_default(20i64)
            .optional(),
    ])
    .with_outputs(vec![
        TerraformOutput::new("instance_id", "EC2 instance ID", "aws_instance.${var.name}.id"),
        TerraformOutput::new(
            "public_ip",
            "Public IP address",
            "aws_instance.${var.name}.public_ip",
        ),
        TerraformOutput::new(
            "private_ip",
            "Private IP address",
            "aws_instance.${var.name}.private_ip",
        ),
    ])
    .with_examples(vec![TerraformExample::new(
        "Basic web server",
        "A minimal t3.small web server.",
        r#"module "web" {
  source        = "terramod/aws_ec2_instance"
  name          = "web-prod"
  ami_id        = "ami-0abcdef1234567890"
  instance_type = "t3.small"
  subnet_id     = "subnet-12345678"
}"#,
    )])
    .with_tags(tags(&["aws", "ec2", "compute", "vm"]))
}

fn aws_s3_bucket() -> NewModule {
    NewModule::new(
        "aws_s3_bucket",
        Provider::Aws,
        "aws_s3_bucket",
        r#"resource "aws_s3_bucket" "${var.bucket_name}" {
  bucket = "${var.bucket_name}"

  tags = {
    Name        = "${var.bucket_name}"
    Environment = "${var.environment}"
  }
}

resource "aws_s3_bucket_versioning" "${var.bucket_name}_versioning" {
  bucket = aws_s3_bucket.${var.bucket_name}.id

  versioning_configuration {
    status = "${var.versioning_enabled}"
  }
}

resource "aws_s3_bucket_server_side_encryption_configuration" "${var.bucket_name}_sse" {
  bucket = aws_s3_bucket.${var.bucket_name}.id

  rule {
    apply_server_side_encryption_by_default {
      sse_algorithm = "AES256"
    }
  }
}
"#,
    )
    .with_version("3.0.1")
    .with_description("Create an S3 bucket with versioning, encryption, and lifecycle rules.")
    .with_variables(vec![
        TerraformVariable::new("bucket_name", VariableType::String, "Globally unique bucket name"),
        TerraformVariable::new("environment", VariableType::String, "Environment tag")
            .with_default("dev")
            .optional(),
        TerraformVariable::new(
            "versioning_enabled",
            VariableType::String,
            "Enable versioning (Enabled/Suspended)",
        )
        .with_default("Enabled")
        .optional(),
    ])
    .with_outputs(vec![
        TerraformOutput::new("bucket_id", "S3 bucket ID", "aws_s3_bucket.${var.bucket_name}.id"),
        TerraformOutput::new("bucket_arn", "S3 bucket ARN", "aws_s3_bucket.${var.bucket_name}.arn"),
    ])
    .with_tags(tags(&["aws", "s3", "storage", "object-storage"]))
}

fn aws_rds_instance() -> NewModule {
    NewModule::new(
        "aws_rds_instance",
        Provider::Aws,
        "aws_db_instance",
        r#"resource "aws_db_instance" "${var.identifier}" {
  identifier              = "${var.identifier}"
  engine                  = "${var.engine}"
  engine_version          = "${var.engine_version}"
  instance_class          = "${var.instance_class}"
  allocated_storage       = ${var.allocated_storage}
  db_name                 = "${var.db_name}"
  username                = "${var.username}"
  password                = "${var.password}"
  multi_az                = ${var.multi_az}
  skip_final_snapshot     = false
  final_snapshot_identifier = "${var.identifier}-final"
  storage_encrypted       = true
  backup_retention_period = ${var.backup_retention_period}

  tags = {
    Name        = "${var.identifier}"
    Environment = "${var.environment}"
  }
}
"#,
    )
    .with_version("1.4.2")
    .with_description(
        "Provision an RDS instance with automated backups, encryption, and multi-AZ support.",
    )
    .with_variables(vec![
        TerraformVariable::new("identifier", VariableType::String, "RDS instance identifier"),
        TerraformVariable::new("engine", VariableType::String, "Database engine")
            .with_default("postgres")
            .optional(),
        TerraformVariable::new("engine_version", VariableType::String, "Engine version")
            .with_default("15.4")
            .optional(),
        TerraformVariable::new("instance_class", VariableType::String, "Instance class")
            .with_default("db.t3.micro")
            .optional(),
        TerraformVariable::new("allocated_storage", VariableType::Number, "Storage in GB")
            .with_default(20i64)
            .optional(),
        TerraformVariable::new("db_name", VariableType::String, "Initial database name"),
        TerraformVariable::new("username", VariableType::String, "Master username"),
        TerraformVariable::new("password", VariableType::String, "Master password").sensitive(),
        TerraformVariable::new("multi_az", VariableType::Bool, "Enable Multi-AZ")
            .with_default(false)
            .optional(),
        TerraformVariable::new(
            "backup_retention_period",
            VariableType::Number,
            "Backup retention days",
        )
        .with_default(7i64)
        .optional(),
        TerraformVariable::new("environment", VariableType::String, "Environment tag")
            .with_default("dev")
            .optional(),
    ])
    .with_outputs(vec![
        TerraformOutput::new("endpoint", "RDS endpoint", "aws_db_instance.${var.identifier}.endpoint"),
        TerraformOutput::new("port", "RDS port", "aws_db_instance.${var.identifier}.port"),
        TerraformOutput::new("db_name", "Database name", "aws_db_instance.${var.identifier}.db_name"),
    ])
    .with_tags(tags(&["aws", "rds", "database", "postgres", "mysql"]))
}

fn aws_vpc() -> NewModule {
    NewModule::new(
        "aws_vpc",
        Provider::Aws,
        "aws_vpc",
        r#"resource "aws_vpc" "${var.name}" {
  cidr_block           = "${var.cidr_block}"
  enable_dns_support   = true
  enable_dns_hostnames = true

  tags = {
    Name        = "${var.name}"
    Environment = "${var.environment}"
  }
}

resource "aws_internet_gateway" "${var.name}_igw" {
  vpc_id = aws_vpc.${var.name}.id

  tags = {
    Name = "${var.name}-igw"
  }
}
"#,
    )
    .with_version("2.0.0")
    .with_description(
        "Create a VPC with public and private subnets, an internet gateway, and route tables.",
    )
    .with_variables(vec![
        TerraformVariable::new("name", VariableType::String, "VPC name"),
        TerraformVariable::new("cidr_block", VariableType::String, "CIDR block")
            .with_default("10.0.0.0/16")
            .optional(),
        TerraformVariable::new("environment", VariableType::String, "Environment")
            .with_default("dev")
            .optional(),
    ])
    .with_outputs(vec![
        TerraformOutput::new("vpc_id", "VPC ID", "aws_vpc.${var.name}.id"),
        TerraformOutput::new(
            "igw_id",
            "Internet Gateway ID",
            "aws_internet_gateway.${var.name}_igw.id",
        ),
    ])
    .with_tags(tags(&["aws", "vpc", "networking"]))
}

fn gcp_gce_instance() -> NewModule {
    NewModule::new(
        "gcp_gce_instance",
        Provider::Gcp,
        "google_compute_instance",
        r#"resource "google_compute_instance" "${var.name}" {
  name         = "${var.name}"
  machine_type = "${var.machine_type}"
  zone         = "${var.zone}"

  boot_disk {
    initialize_params {
      image = "${var.image}"
      size  = ${var.disk_size_gb}
      type  = "pd-ssd"
    }
  }

  network_interface {
    network    = "${var.network}"
    subnetwork = "${var.subnetwork}"

    access_config {}
  }

  labels = {
    environment = "${var.environment}"
    managed_by  = "terraform"
  }
}
"#,
    )
    .with_version("1.2.0")
    .with_description("Create a Google Compute Engine VM instance.")
    .with_variables(vec![
        TerraformVariable::new("name", VariableType::String, "Instance name"),
        TerraformVariable::new("machine_type", VariableType::String, "Machine type")
            .with_default("e2-medium")
            .optional(),
        TerraformVariable::new("zone", VariableType::String, "GCP zone")
            .with_default("us-central1-a")
            .optional(),
        TerraformVariable::new("image", VariableType::String, "Boot disk image")
            .with_default("debian-cloud/debian-11")
            .optional(),
        TerraformVariable::new("disk_size_gb", VariableType::Number, "Boot disk size")
            .with_default(20i64)
            .optional(),
        TerraformVariable::new("network", VariableType::String, "VPC network")
            .with_default("default")
            .optional(),
        TerraformVariable::new("subnetwork", VariableType::String, "Subnetwork")
            .with_default("default")
            .optional(),
        TerraformVariable::new("environment", VariableType::String, "Environment")
            .with_default("dev")
            .optional(),
    ])
    .with_outputs(vec![
        TerraformOutput::new(
            "instance_id",
            "GCE instance ID",
            "google_compute_instance.${var.name}.id",
        ),
        TerraformOutput::new(
            "external_ip",
            "External IP address",
            "google_compute_instance.${var.name}.network_interface[0].access_config[0].nat_ip",
        ),
    ])
    .with_tags(tags(&["gcp", "gce", "compute", "vm"]))
}

fn gcp_gcs_bucket() -> NewModule {
    NewModule::new(
        "gcp_gcs_bucket",
        Provider::Gcp,
        "google_storage_bucket",
        r#"resource "google_storage_bucket" "${var.name}" {
  name                        = "${var.name}"
  location                    = "${var.location}"
  storage_class               = "${var.storage_class}"
  uniform_bucket_level_access = true
  force_destroy               = ${var.force_destroy}

  versioning {
    enabled = ${var.versioning}
  }

  labels = {
    environment = "${var.environment}"
  }
}
"#,
    )
    .with_version("1.1.0")
    .with_description(
        "Create a Google Cloud Storage bucket with lifecycle and uniform bucket-level access.",
    )
    .with_variables(vec![
        TerraformVariable::new("name", VariableType::String, "Bucket name (globally unique)"),
        TerraformVariable::new("location", VariableType::String, "GCS location")
            .with_default("US")
            .optional(),
        TerraformVariable::new("storage_class", VariableType::String, "Storage class")
            .with_default("STANDARD")
            .optional(),
        TerraformVariable::new("versioning", VariableType::Bool, "Enable versioning")
            .with_default(true)
            .optional(),
        TerraformVariable::new("force_destroy", VariableType::Bool, "Force destroy")
            .with_default(false)
            .optional(),
        TerraformVariable::new("environment", VariableType::String, "Environment tag")
            .with_default("dev")
            .optional(),
    ])
    .with_outputs(vec![
        TerraformOutput::new("bucket_url", "GCS bucket URL", "google_storage_bucket.${var.name}.url"),
        TerraformOutput::new("self_link", "Self link", "google_storage_bucket.${var.name}.self_link"),
    ])
    .with_tags(tags(&["gcp", "gcs", "storage", "object-storage"]))
}

fn kubernetes_deployment() -> NewModule {
    NewModule::new(
        "kubernetes_deployment",
        Provider::Kubernetes,
        "kubernetes_deployment",
        r#"resource "kubernetes_deployment" "${var.name}" {
  metadata {
    name      = "${var.name}"
    namespace = "${var.namespace}"

    labels = {
      app = "${var.name}"
    }
  }

  spec {
    replicas = ${var.replicas}

    selector {
      match_labels = {
        app = "${var.name}"
      }
    }

    template {
      metadata {
        labels = {
          app = "${var.name}"
        }
      }

      spec {
        container {
          name  = "${var.name}"
          image = "${var.image}"

          port {
            container_port = ${var.container_port}
          }

          resources {
            limits = {
              cpu    = "${var.cpu_limit}"
              memory = "${var.memory_limit}"
            }
            requests = {
              cpu    = "${var.cpu_request}"
              memory = "${var.memory_request}"
            }
          }
        }
      }
    }
  }
}
"#,
    )
    .with_version("1.3.0")
    .with_description(
        "Create a Kubernetes Deployment with configurable replicas, image, and resource limits.",
    )
    .with_variables(vec![
        TerraformVariable::new("name", VariableType::String, "Deployment name"),
        TerraformVariable::new("namespace", VariableType::String, "Kubernetes namespace")
            .with_default("default")
            .optional(),
        TerraformVariable::new("image", VariableType::String, "Container image"),
        TerraformVariable::new("replicas", VariableType::Number, "Number of replicas")
            .with_default(2i64)
            .optional(),
        TerraformVariable::new("container_port", VariableType::Number, "Container port")
            .with_default(8080i64)
            .optional(),
        TerraformVariable::new("cpu_limit", VariableType::String, "CPU limit")
            .with_default("500m")
            .optional(),
        TerraformVariable::new("memory_limit", VariableType::String, "Memory limit")
            .with_default("256Mi")
            .optional(),
        TerraformVariable::new("cpu_request", VariableType::String, "CPU request")
            .with_default("100m")
            .optional(),
        TerraformVariable::new("memory_request", VariableType::String, "Memory request")
            .with_default("128Mi")
            .optional(),
    ])
    .with_outputs(vec![
        TerraformOutput::new(
            "deployment_name",
            "Deployment name",
            "kubernetes_deployment.${var.name}.metadata[0].name",
        ),
        TerraformOutput::new(
            "replicas",
            "Current replica count",
            "kubernetes_deployment.${var.name}.spec[0].replicas",
        ),
    ])
    .with_tags(tags(&["kubernetes", "k8s", "deployment", "container"]))
}

fn kubernetes_service() -> NewModule {
    NewModule::new(
        "kubernetes_service",
        Provider::Kubernetes,
        "kubernetes_service",
        r#"resource "kubernetes_service" "${var.name}" {
  metadata {
    name      = "${var.name}"
    namespace = "${var.namespace}"
  }

  spec {
    selector = {
      app = "${var.selector_app}"
    }

    type = "${var.service_type}"

    port {
      port        = ${var.port}
      target_port = ${var.target_port}
      protocol    = "TCP"
    }
  }
}
"#,
    )
    .with_version("1.1.0")
    .with_description("Expose a Kubernetes Deployment via a LoadBalancer or ClusterIP Service.")
    .with_variables(vec![
        TerraformVariable::new("name", VariableType::String, "Service name"),
        TerraformVariable::new("namespace", VariableType::String, "Kubernetes namespace")
            .with_default("default")
            .optional(),
        TerraformVariable::new("selector_app", VariableType::String, "App label selector"),
        TerraformVariable::new("service_type", VariableType::String, "Service type")
            .with_default("ClusterIP")
            .optional(),
        TerraformVariable::new("port", VariableType::Number, "Service port")
            .with_default(80i64)
            .optional(),
        TerraformVariable::new("target_port", VariableType::Number, "Target container port")
            .with_default(8080i64)
            .optional(),
    ])
    .with_outputs(vec![
        TerraformOutput::new(
            "service_name",
            "Service name",
            "kubernetes_service.${var.name}.metadata[0].name",
        ),
        TerraformOutput::new(
            "cluster_ip",
            "Cluster IP",
            "kubernetes_service.${var.name}.spec[0].cluster_ip",
        ),
        TerraformOutput::new(
            "load_balancer_ip",
            "Load Balancer IP",
            "kubernetes_service.${var.name}.status[0].load_balancer[0].ingress[0].ip",
        ),
    ])
    .with_tags(tags(&["kubernetes", "k8s", "service", "networking"]))
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}
