pub mod coindar_client;
